pub mod browser;
#[cfg(test)]
pub mod test_utils;
pub mod url;
