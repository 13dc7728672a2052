use std::mem::size_of;

use ash::vk;
use log::{debug, trace};

use crate::error::{Result, SpecializationError};
use crate::layout::{self, read_at, write_at};
use crate::pack::{ScalarList, ShaderSpecialization};
use crate::scalar::{Scalar, ScalarKind};

/// Specialization constants whose layout is only known at run time.
///
/// Uses the same packing as [`ShaderSpecialization`], but accesses are checked when they
/// happen instead of when they are compiled.
#[derive(Debug, Default)]
pub struct SpecializationMap {
    kinds: Vec<ScalarKind>,
    entries: Vec<vk::SpecializationMapEntry>,
    data: Vec<u8>,
}

impl SpecializationMap {
    pub fn new(kinds: impl IntoIterator<Item = ScalarKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        let entries = layout::map_entries(&kinds).collect();
        let data = vec![0; layout::packed_size(&kinds)];
        trace!(
            "specialization layout {:?}: {} constants in {} bytes",
            kinds,
            kinds.len(),
            data.len()
        );
        Self {
            kinds,
            entries,
            data,
        }
    }

    /// Appends a constant holding `value` and returns its constant id.
    ///
    /// # Panics
    /// If the id or offset of the new constant does not fit into a `u32`.
    pub fn push<T: Scalar>(&mut self, value: T) -> u32 {
        let index = self.kinds.len();
        self.kinds.push(T::KIND);
        let entry = layout::map_entry(&self.kinds, index);
        self.entries.push(entry);
        self.data.extend_from_slice(bytemuck::bytes_of(&value));
        debug!("pushed constant {index} = {value:?} ({})", T::KIND);
        entry.constant_id
    }

    pub fn count(&self) -> usize {
        self.kinds.len()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn kinds(&self) -> &[ScalarKind] {
        &self.kinds
    }

    pub fn kind(&self, index: usize) -> Option<ScalarKind> {
        self.kinds.get(index).copied()
    }

    pub fn offset_of(&self, index: usize) -> Result<usize> {
        let entry = self.entries.get(index).ok_or(self.out_of_range(index))?;
        Ok(entry.offset as usize)
    }

    pub fn entries(&self) -> &[vk::SpecializationMapEntry] {
        &self.entries
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get<T: Scalar>(&self, index: usize) -> Result<T> {
        let offset = self.checked_offset::<T>(index)?;
        Ok(bytemuck::pod_read_unaligned(read_at(
            &self.data,
            offset,
            size_of::<T>(),
        )))
    }

    pub fn set<T: Scalar>(&mut self, index: usize, value: T) -> Result<()> {
        let offset = self.checked_offset::<T>(index)?;
        write_at(&mut self.data, offset, bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Describes the constants for `vkCreate*Pipelines`, borrowing `self`.
    pub fn info(&self) -> vk::SpecializationInfo<'_> {
        vk::SpecializationInfo::default()
            .map_entries(&self.entries)
            .data(&self.data)
    }

    fn checked_offset<T: Scalar>(&self, index: usize) -> Result<usize> {
        let expected = self.kind(index).ok_or(self.out_of_range(index))?;
        if expected != T::KIND {
            return Err(SpecializationError::KindMismatch {
                index,
                expected,
                found: T::KIND,
            });
        }
        Ok(self.entries[index].offset as usize)
    }

    fn out_of_range(&self, index: usize) -> SpecializationError {
        SpecializationError::IndexOutOfRange {
            index,
            count: self.count(),
        }
    }
}

impl Clone for SpecializationMap {
    fn clone(&self) -> Self {
        Self {
            kinds: self.kinds.clone(),
            entries: self.entries.clone(),
            data: self.data.clone(),
        }
    }

    /// Reuses the layout of `self` when it already matches `source`, copying only the values.
    fn clone_from(&mut self, source: &Self) {
        if self.kinds != source.kinds {
            self.kinds.clone_from(&source.kinds);
            self.entries.clone_from(&source.entries);
        }
        self.data.clone_from(&source.data);
    }
}

impl PartialEq for SpecializationMap {
    fn eq(&self, other: &Self) -> bool {
        self.kinds == other.kinds && self.data == other.data
    }
}

impl<L: ScalarList> From<&ShaderSpecialization<L>> for SpecializationMap {
    fn from(sp: &ShaderSpecialization<L>) -> Self {
        Self {
            kinds: sp.kinds().to_vec(),
            entries: sp.entries().to_vec(),
            data: sp.as_bytes().to_vec(),
        }
    }
}
