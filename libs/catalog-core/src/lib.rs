pub mod core {
    pub mod bits;
    pub mod deque_macros;
    pub mod functional;
    pub mod logging;
    pub mod test_util;
}
