#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    pub strip_components: usize,
}

impl ExtractOptions {
    /// Drops this many leading path components from every entry, like
    /// `tar --strip-components`.
    pub fn strip_components(mut self, n: usize) -> Self {
        self.strip_components = n;
        self
    }
}
