//! Construction macros

/// value creation macro
#[macro_export]
macro_rules! value {
    ($val:expr) => {{
        $crate::Value::from($val)
    }};
}

/// row creation macro
/// Supporting:
/// 1. empty row
/// 1. row with `key => value` pairs, kept in the written order
#[macro_export]
macro_rules! row {
    () => {{
        $crate::Row::new()
    }};
    ($($key:expr => $val:expr),+ $(,)*) => {{
        let mut row = $crate::Row::new();
        $(
            row.insert($key, $crate::Value::from($val));
        )+
        row
    }};
}
