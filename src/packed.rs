//! Packed storage types backing [`ShaderSpecialization`](crate::ShaderSpecialization).
//!
//! `PackedN` holds the values of an `N`-tuple of scalars back to back, so its size is the
//! sum of the field sizes and its alignment is 1.

use std::mem::size_of;

use ash::vk;
use bytemuck::{Pod, Zeroable};

use crate::layout;
use crate::pack::{Field, ScalarList};
use crate::scalar::{sealed::Sealed, Scalar, ScalarKind};

macro_rules! packed_list {
    (@field [$($all:ident),+] [$($prev:ident),*] $idx:tt => $ty:ident $(, $ridx:tt => $rty:ident)*) => {
        impl<$($all: Scalar),+> Field<$idx> for ($($all,)+) {
            type Ty = $ty;
            const OFFSET: usize = 0 $(+ size_of::<$prev>())*;
        }

        packed_list!(@field [$($all),+] [$($prev,)* $ty] $($ridx => $rty),*);
    };
    (@field [$($all:ident),+] [$($prev:ident),*]) => {};
    ($packed:ident, $count:literal; $($idx:tt => $ty:ident),+) => {
        #[repr(C, packed)]
        pub struct $packed<$($ty),+>($(pub $ty),+);

        impl<$($ty: Scalar),+> Clone for $packed<$($ty),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($ty: Scalar),+> Copy for $packed<$($ty),+> {}

        impl<$($ty: Scalar),+> $packed<$($ty),+> {
            pub const KINDS: &'static [ScalarKind] = &[$($ty::KIND),+];
        }

        // SAFETY: every field is Zeroable
        unsafe impl<$($ty: Scalar),+> Zeroable for $packed<$($ty),+> {}

        // SAFETY: repr(C, packed) over Pod fields leaves no padding bytes
        unsafe impl<$($ty: Scalar),+> Pod for $packed<$($ty),+> {}

        impl<$($ty: Scalar),+> Sealed for ($($ty,)+) {}

        impl<$($ty: Scalar),+> ScalarList for ($($ty,)+) {
            type Storage = $packed<$($ty),+>;
            type Entries = [vk::SpecializationMapEntry; $count];

            const KINDS: &'static [ScalarKind] = $packed::<$($ty),+>::KINDS;

            fn entries() -> Self::Entries {
                std::array::from_fn(|index| layout::map_entry(Self::KINDS, index))
            }
        }

        #[cfg(feature = "vulkano")]
        impl<$($ty: Scalar),+> $packed<$($ty),+> {
            const DESCRIPTORS: &'static [vulkano::shader::SpecializationMapEntry] = &[$(
                vulkano::shader::SpecializationMapEntry {
                    constant_id: $idx,
                    offset: layout::offset_of(Self::KINDS, $idx) as u32,
                    size: size_of::<$ty>(),
                }
            ),+];
        }

        // SAFETY: DESCRIPTORS is derived from the same packed layout the struct has
        #[cfg(feature = "vulkano")]
        unsafe impl<$($ty: Scalar),+> vulkano::shader::SpecializationConstants for $packed<$($ty),+> {
            fn descriptors() -> &'static [vulkano::shader::SpecializationMapEntry] {
                Self::DESCRIPTORS
            }
        }

        packed_list!(@field [$($ty),+] [] $($idx => $ty),+);
    };
}

packed_list!(Packed1, 1; 0 => A);
packed_list!(Packed2, 2; 0 => A, 1 => B);
packed_list!(Packed3, 3; 0 => A, 1 => B, 2 => C);
packed_list!(Packed4, 4; 0 => A, 1 => B, 2 => C, 3 => D);
packed_list!(Packed5, 5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
packed_list!(Packed6, 6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
packed_list!(Packed7, 7; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
packed_list!(Packed8, 8; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);
packed_list!(Packed9, 9; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I);
packed_list!(Packed10, 10; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J);
packed_list!(Packed11, 11; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K);
packed_list!(Packed12, 12; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H, 8 => I, 9 => J, 10 => K, 11 => L);

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(Packed3<i32, i32, f32>, [u8; 12]);
    assert_eq_size!(Packed4<u8, f64, u16, i8>, [u8; 12]);
    assert_eq_align!(Packed2<u64, u8>, u8);

    #[test]
    fn offsets_skip_no_bytes() {
        type L = (u8, f64, u16, i8);
        assert_eq!(<L as Field<0>>::OFFSET, 0);
        assert_eq!(<L as Field<1>>::OFFSET, 1);
        assert_eq!(<L as Field<2>>::OFFSET, 9);
        assert_eq!(<L as Field<3>>::OFFSET, 11);
        assert_eq!(<L as ScalarList>::SIZE, 12);
        assert_eq!(<L as ScalarList>::COUNT, 4);
    }

    #[test]
    fn widest_list() {
        type L = (u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, u8, u16);
        assert_eq!(<L as ScalarList>::COUNT, 12);
        assert_eq!(
            <L as ScalarList>::SIZE,
            size_of::<<L as ScalarList>::Storage>()
        );
        assert_eq!(<L as Field<11>>::OFFSET, <L as ScalarList>::SIZE - 2);
        let entries = <L as ScalarList>::entries();
        assert_eq!(entries[11].constant_id, 11);
        assert_eq!(entries[11].offset as usize, <L as Field<11>>::OFFSET);
    }

    #[test]
    fn storage_fields_line_up_with_bytes() {
        let storage = Packed3::<u8, u32, u8>(1, 0x0202_0202, 3);
        assert_eq!(bytemuck::bytes_of(&storage), &[1, 2, 2, 2, 2, 3]);
    }

    #[cfg(feature = "vulkano")]
    #[test]
    fn vulkano_descriptors_match_entries() {
        use vulkano::shader::SpecializationConstants;

        type L = (i32, f64, u16);
        let descriptors = <<L as ScalarList>::Storage as SpecializationConstants>::descriptors();
        let entries = <L as ScalarList>::entries();
        assert_eq!(descriptors.len(), entries.len());
        for (descriptor, entry) in descriptors.iter().zip(entries.iter()) {
            assert_eq!(descriptor.constant_id, entry.constant_id);
            assert_eq!(descriptor.offset, entry.offset);
            assert_eq!(descriptor.size, entry.size);
        }
    }
}
