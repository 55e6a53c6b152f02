pub mod fixtures;
pub mod sandbox;

pub use insta;

/// Inline snapshot assertion with sandbox temp paths masked as `[SANDBOX]`.
#[macro_export]
macro_rules! assert_snapshot {
    ($value:expr, @$snapshot:literal) => {
        $crate::insta::with_settings!({
            filters => vec![(r"/[^\s:]*/\.tmp[^/\s]*", "[SANDBOX]")],
        }, {
            $crate::insta::assert_snapshot!($value, @$snapshot);
        });
    };
}
