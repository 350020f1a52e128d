/// Converts errors from their error type (of the submodule) to that of
/// a roadside::Error variant, or of another submodule's error.
///
/// ```rust,ignore
/// use roadside::sample::error::SampleError;
/// roadside::impl_err!(SampleError, Sample);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
        ($from:ty, $to:ident, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    $to::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
