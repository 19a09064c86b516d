#[cfg(feature = "trace")]
#[macro_export]
macro_rules! lr1_trace {
    () => {
        print!("\n")
    };
    ($($arg:tt)*) => {{
        println!("[lr1] {}", format!($($arg)*))
    }}
}

// Arguments are still type checked, but never evaluated
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! lr1_trace {
    () => {};
    ($($arg:tt)*) => {{
        if false {
            let _ = format!($($arg)*);
        }
    }};
}
