pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns `InvalidArgument` from the enclosing function unless `$cond`
/// holds. The error carries the argument name and the failed condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($cond),
            ));
        }
    };
}

/// Returns `InvalidFormat` from the enclosing function unless `$cond` holds.
#[macro_export]
macro_rules! verify_data {
    ($element:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_format(
                stringify!($element),
                stringify!($cond),
            ));
        }
    };
}
