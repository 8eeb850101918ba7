// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, &str or &String
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! cols {
    // Column header shorthand: cols!["Date", "Title"] → Vec<String>
    ($($h:expr),* $(,)?) => {
        ::std::vec![$( ::std::string::String::from($h) ),*]
    };
}
