use std::fmt::{self, Debug};
use std::mem::size_of;

use ash::vk;
use bytemuck::{Pod, Zeroable};
use log::trace;

use crate::layout::{self, read_at, write_at};
use crate::scalar::{sealed::Sealed, Scalar, ScalarKind};

/// An ordered list of [`Scalar`] types, implemented for tuples `(T0,)` up to
/// `(T0, .., T11)`.
///
/// The trait is sealed, the layout of every list is generated by this crate:
/// ```compile_fail
/// use ash::vk;
/// use shader_specialization::{ScalarKind, ScalarList};
///
/// struct Bogus;
///
/// impl ScalarList for Bogus {
///     type Storage = [u8; 2];
///     type Entries = [vk::SpecializationMapEntry; 1];
///     const KINDS: &'static [ScalarKind] = &[ScalarKind::F64];
///
///     fn entries() -> Self::Entries {
///         [vk::SpecializationMapEntry::default()]
///     }
/// }
/// ```
pub trait ScalarList: Sealed + Sized + 'static {
    /// Packed storage holding one value of every type, `SIZE` bytes without padding.
    type Storage: Pod + Send + Sync;
    /// Descriptor table, one entry per field.
    type Entries: AsRef<[vk::SpecializationMapEntry]> + Copy + Send + Sync;

    const KINDS: &'static [ScalarKind];
    const COUNT: usize = Self::KINDS.len();
    const SIZE: usize = layout::packed_size(Self::KINDS);

    fn entries() -> Self::Entries;
}

/// Field `N` of a [`ScalarList`]. Sealed through its supertrait.
pub trait Field<const N: usize>: ScalarList {
    type Ty: Scalar;
    const OFFSET: usize;
}

/// Typed specialization constants, packed for pipeline creation.
///
/// Field `N` of the list `L` is mapped to constant id `N`.
///
/// ```
/// use shader_specialization::ShaderSpecialization;
///
/// let mut sp = ShaderSpecialization::<(i32, i32, f32)>::new();
/// sp.set::<0>(4);
/// sp.set::<1>(1);
/// sp.set::<2>(93.2);
/// assert_eq!(sp.get::<2>(), 93.2);
///
/// let info = sp.info();
/// assert_eq!(info.map_entry_count, 3);
/// assert_eq!(info.data_size, 12);
/// ```
///
/// Only scalars may be stored:
/// ```compile_fail
/// use shader_specialization::ShaderSpecialization;
/// let sp = ShaderSpecialization::<(i32, [f32; 4])>::new();
/// ```
///
/// The value must have the field's type:
/// ```compile_fail
/// use shader_specialization::ShaderSpecialization;
/// let mut sp = ShaderSpecialization::<(i32, f32)>::new();
/// sp.set::<1>(4i32);
/// ```
///
/// And the index must exist:
/// ```compile_fail
/// use shader_specialization::ShaderSpecialization;
/// let sp = ShaderSpecialization::<(i32, f32)>::new();
/// let _ = sp.get::<2>();
/// ```
pub struct ShaderSpecialization<L: ScalarList> {
    entries: L::Entries,
    data: L::Storage,
}

impl<L: ScalarList> ShaderSpecialization<L> {
    pub const COUNT: usize = L::COUNT;
    pub const SIZE: usize = L::SIZE;

    pub fn new() -> Self {
        trace!(
            "specialization layout {:?}: {} constants in {} bytes",
            L::KINDS,
            L::COUNT,
            L::SIZE
        );
        Self {
            entries: L::entries(),
            data: <L::Storage as Zeroable>::zeroed(),
        }
    }

    pub const fn offset_of<const N: usize>() -> usize
    where
        L: Field<N>,
    {
        <L as Field<N>>::OFFSET
    }

    pub fn get<const N: usize>(&self) -> <L as Field<N>>::Ty
    where
        L: Field<N>,
    {
        let bytes = read_at(
            self.as_bytes(),
            <L as Field<N>>::OFFSET,
            size_of::<<L as Field<N>>::Ty>(),
        );
        bytemuck::pod_read_unaligned(bytes)
    }

    pub fn set<const N: usize>(&mut self, value: <L as Field<N>>::Ty)
    where
        L: Field<N>,
    {
        write_at(
            bytemuck::bytes_of_mut(&mut self.data),
            <L as Field<N>>::OFFSET,
            bytemuck::bytes_of(&value),
        );
    }

    pub fn kinds(&self) -> &'static [ScalarKind] {
        L::KINDS
    }

    pub fn entries(&self) -> &[vk::SpecializationMapEntry] {
        self.entries.as_ref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.data)
    }

    /// The packed storage. With the `vulkano` feature enabled it implements
    /// `SpecializationConstants` and can be handed to vulkano pipeline constructors.
    pub fn constants(&self) -> &L::Storage {
        &self.data
    }

    /// Describes the constants for `vkCreate*Pipelines`.
    ///
    /// The returned struct borrows `self`, so it can't outlive or observe a moved pack.
    pub fn info(&self) -> vk::SpecializationInfo<'_> {
        vk::SpecializationInfo::default()
            .map_entries(self.entries())
            .data(self.as_bytes())
    }
}

impl<L: ScalarList> Default for ShaderSpecialization<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ScalarList> Clone for ShaderSpecialization<L> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            data: self.data,
        }
    }

    /// Copies the values only, the descriptor table of `self` is already correct.
    fn clone_from(&mut self, source: &Self) {
        self.data = source.data;
    }
}

impl<L: ScalarList> PartialEq for ShaderSpecialization<L> {
    /// Bytewise comparison of the stored values.
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<L: ScalarList> Debug for ShaderSpecialization<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderSpecialization")
            .field("kinds", &L::KINDS)
            .field("size", &L::SIZE)
            .field("entries", &self.entries())
            .field("data", &self.as_bytes())
            .finish()
    }
}
