// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand, mostly for defaults and test rows.

    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
