pub trait FromU32 {
    fn from_u32(src: u32) -> Self;
}

impl FromU32 for usize {
    // Lossless since the crate refuses 16-bit targets.
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        src as usize
    }
}
