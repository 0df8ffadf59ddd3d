/// A value that names a vertex by a dense, low-valued array index.
///
/// Graph algorithms use memory proportional to the largest index they are given. Conversion is
/// fallible so that signed callers can pass negative values and get a
/// [`DomError::InvalidVertex`](crate::DomError::InvalidVertex) back instead of a wrapped index.
pub trait Vertex: Copy {
    /// Returns the array index of this vertex, or `None` if it does not name a valid vertex.
    fn to_index(self) -> Option<usize>;

    /// Converts an index back into a vertex, or `None` if this type cannot represent it.
    fn from_index(index: usize) -> Option<Self>;
}

macro_rules! impl_vertex {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Vertex for $ty {
                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                fn from_index(index: usize) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

impl_vertex!(usize, u64, u32, u16, u8, isize, i64, i32, i16);
