pub mod matrix_utils;
pub mod test_util;
