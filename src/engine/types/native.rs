use crate::shared::datetime::packed::{DateTimeV2Value, DateV2Value};

/// Fixed-width value stored in host byte order inside a batch buffer.
pub trait NativeValue: Copy {
    const WIDTH: usize;

    /// Decodes one value; `bytes` must be exactly `WIDTH` long.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    fn write_ne(self, out: &mut Vec<u8>);
}

macro_rules! impl_native_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl NativeValue for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_ne_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(raw)
                }

                #[inline]
                fn write_ne(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_native_primitive!(i8, u8, i16, u16, i32, u32, i64, u64, i128, f32, f64);

impl NativeValue for DateV2Value {
    const WIDTH: usize = 4;

    #[inline]
    fn from_ne_slice(bytes: &[u8]) -> Self {
        DateV2Value(u32::from_ne_slice(bytes))
    }

    #[inline]
    fn write_ne(self, out: &mut Vec<u8>) {
        self.0.write_ne(out);
    }
}

impl NativeValue for DateTimeV2Value {
    const WIDTH: usize = 8;

    #[inline]
    fn from_ne_slice(bytes: &[u8]) -> Self {
        DateTimeV2Value(u64::from_ne_slice(bytes))
    }

    #[inline]
    fn write_ne(self, out: &mut Vec<u8>) {
        self.0.write_ne(out);
    }
}

/// Decodes every complete `T` in `bytes` and appends it to `dst`.
pub fn extend_from_ne_bytes<T: NativeValue>(dst: &mut Vec<T>, bytes: &[u8]) {
    dst.reserve(bytes.len() / T::WIDTH);
    dst.extend(bytes.chunks_exact(T::WIDTH).map(T::from_ne_slice));
}
