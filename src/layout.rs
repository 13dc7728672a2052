//! Packing rule shared by [`ShaderSpecialization`](crate::ShaderSpecialization) and
//! [`SpecializationMap`](crate::SpecializationMap).
//!
//! Fields are laid out back to back in declaration order, starting at offset zero,
//! without any padding. Field `i` receives constant id `i`.

use ash::vk;

use crate::scalar::ScalarKind;

/// Byte offset of field `index`. Passing `kinds.len()` yields the packed size.
pub const fn offset_of(kinds: &[ScalarKind], index: usize) -> usize {
    let mut offset = 0;
    let mut i = 0;
    while i < index {
        offset += kinds[i].size();
        i += 1;
    }
    offset
}

pub const fn packed_size(kinds: &[ScalarKind]) -> usize {
    offset_of(kinds, kinds.len())
}

/// # Panics
/// If the constant id or offset does not fit into the `u32` Vulkan expects.
pub fn map_entry(kinds: &[ScalarKind], index: usize) -> vk::SpecializationMapEntry {
    vk::SpecializationMapEntry {
        constant_id: to_u32(index, "constant id"),
        offset: to_u32(offset_of(kinds, index), "offset"),
        size: kinds[index].size(),
    }
}

/// # Panics
/// Same as [`map_entry`].
pub fn map_entries(kinds: &[ScalarKind]) -> impl Iterator<Item = vk::SpecializationMapEntry> + '_ {
    kinds
        .iter()
        .enumerate()
        .scan(0usize, |offset, (index, kind)| {
            let entry = vk::SpecializationMapEntry {
                constant_id: to_u32(index, "constant id"),
                offset: to_u32(*offset, "offset"),
                size: kind.size(),
            };
            *offset += kind.size();
            Some(entry)
        })
}

fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value)
        .unwrap_or_else(|_| panic!("{what} {value} does not fit into a u32"))
}

/// Copies `bytes` into `buf` starting at `offset`.
///
/// # Panics
/// If the range does not fit into `buf`.
pub fn write_at(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// Borrows `len` bytes of `buf` starting at `offset`.
///
/// # Panics
/// If the range does not fit into `buf`.
pub fn read_at(buf: &[u8], offset: usize, len: usize) -> &[u8] {
    &buf[offset..offset + len]
}
