//! Message lookup used for translated names and catalogs.

/// Looks up translated messages.
pub trait MessageSource {
    /// Translation of `message` in `category` into `language`.
    ///
    /// Untranslated messages are returned unchanged.
    fn translate(&self, category: &str, message: &str, language: &str) -> String;
}
