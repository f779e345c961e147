//! The `array!` construction macro.

/// Construct an [`Array`](crate::Array), `vec!`-style.
///
/// Three forms:
///
/// ```rust
/// use contig::array;
///
/// let empty: contig::Array<i32> = array![];
/// let filled = array![0u8; 4];        // four zeros
/// let listed = array![1, 2, 3];       // explicit elements
///
/// assert!(empty.is_empty());
/// assert_eq!(filled.len(), 4);
/// assert_eq!(listed.as_slice(), &[1, 2, 3]);
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($value:expr; $count:expr) => {
        $crate::Array::from_elem($count, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Array::from([$($value),+])
    };
}
