//! Static ELF Loader.
//!
//! This module turns an AArch64 ELF executable into an initial process image.
//! It performs:
//! 1. **Validation:** ELF64, little-endian, `EM_AARCH64`, no program interpreter.
//! 2. **Image construction:** All `PT_LOAD` segments are placed in one
//!    page-rounded region; file bytes are copied and the BSS tail stays zero.
//! 3. **Entry resolution:** `e_entry` is translated through the segment that
//!    contains it.
//! 4. **Stack setup:** A separate zeroed stack region and an aligned initial SP.
//!
//! Physical addresses are used for placement when any loadable segment has
//! `p_vaddr != p_paddr`; virtual addresses otherwise.

use std::fs;
use std::path::Path;

use object::Endianness;
use object::elf::{EM_AARCH64, FileHeader64, PT_INTERP, PT_LOAD, ProgramHeader64};
use object::read::elf::{FileHeader, ProgramHeader};
use tracing::info;

use crate::common::LoadError;
use crate::common::constants::{PAGE_SIZE, STACK_ALIGN, page_round_up};
use crate::config::MemoryConfig;
use crate::soc::memory::{AddressSpace, Region};

type Header = FileHeader64<Endianness>;
type Segment = ProgramHeader64<Endianness>;

/// Initial process image handed to the fetch loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Mapped program and stack regions.
    pub memory: AddressSpace,
    /// Initial program counter.
    pub entry: u64,
    /// Initial stack pointer, 16-byte aligned.
    pub initial_sp: u64,
}

/// Reads and loads the ELF executable at `path`.
///
/// # Arguments
///
/// * `path` - Path to the executable.
/// * `layout` - Stack placement and region size limit.
pub fn load_elf_file(
    path: impl AsRef<Path>,
    layout: &MemoryConfig,
) -> Result<LoadedImage, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "loading ELF");
    load_elf(&data, layout)
}

/// Loads an ELF executable held in memory.
///
/// # Arguments
///
/// * `data` - The complete file contents.
/// * `layout` - Stack placement and region size limit.
///
/// # Returns
///
/// The process image, or the first reason the file cannot be run.
pub fn load_elf(data: &[u8], layout: &MemoryConfig) -> Result<LoadedImage, LoadError> {
    let header = Header::parse(data)?;
    let endian = header.endian()?;
    if endian != Endianness::Little {
        return Err(LoadError::BigEndian);
    }
    let machine = header.e_machine(endian);
    if machine != EM_AARCH64 {
        return Err(LoadError::WrongMachine { machine });
    }

    let phdrs = header.program_headers(endian, data)?;
    if let Some(interp) = phdrs.iter().find(|ph| ph.p_type(endian) == PT_INTERP) {
        let interp = interp.interpreter(endian, data)?.unwrap_or_default();
        return Err(LoadError::DynamicallyLinked {
            interp: String::from_utf8_lossy(interp).into_owned(),
        });
    }

    let segments: Vec<&Segment> = phdrs
        .iter()
        .filter(|ph| ph.p_type(endian) == PT_LOAD && ph.p_memsz(endian) != 0)
        .collect();
    if segments.is_empty() {
        return Err(LoadError::NoLoadableSegments);
    }

    let use_paddr = segments
        .iter()
        .any(|ph| ph.p_vaddr(endian) != ph.p_paddr(endian));
    let load_addr = |ph: &Segment| {
        if use_paddr {
            ph.p_paddr(endian)
        } else {
            ph.p_vaddr(endian)
        }
    };

    let mut lo = u64::MAX;
    let mut hi = 0u64;
    for &ph in &segments {
        let start = load_addr(ph);
        let end = start
            .checked_add(ph.p_memsz(endian))
            .ok_or(LoadError::BadSegment { addr: start })?;
        lo = lo.min(start);
        hi = hi.max(end);
    }

    let base = lo & !(PAGE_SIZE - 1);
    let size = page_round_up(hi - base);
    let mut image = allocate(base, size, layout.max_region_size)?;

    for &ph in &segments {
        let addr = load_addr(ph);
        let bytes = ph
            .data(endian, data)
            .map_err(|()| LoadError::BadSegment { addr })?;
        if ph.p_filesz(endian) > ph.p_memsz(endian) {
            return Err(LoadError::BadSegment { addr });
        }
        image
            .slice_mut(addr, bytes.len())
            .ok_or(LoadError::BadSegment { addr })?
            .copy_from_slice(bytes);
        info!(
            filesz = ph.p_filesz(endian),
            memsz = ph.p_memsz(endian),
            "loaded segment {:#x} at {addr:#x}",
            ph.p_vaddr(endian)
        );
    }

    let e_entry = header.e_entry(endian);
    let entry = segments
        .iter()
        .copied()
        .find(|ph| {
            let vaddr = ph.p_vaddr(endian);
            e_entry >= vaddr && e_entry - vaddr < ph.p_memsz(endian)
        })
        .map(|ph| e_entry - ph.p_vaddr(endian) + load_addr(ph))
        .ok_or(LoadError::EntryOutsideImage { entry: e_entry })?;

    let (stack, initial_sp) = build_stack(layout)?;

    let mut memory = AddressSpace::new();
    memory.map(image)?;
    memory.map(stack)?;

    info!("process image ready: entry {entry:#x}, sp {initial_sp:#x}");
    Ok(LoadedImage {
        memory,
        entry,
        initial_sp,
    })
}

/// Builds the stack region and the initial stack pointer.
fn build_stack(layout: &MemoryConfig) -> Result<(Region, u64), LoadError> {
    let MemoryConfig {
        stack_top,
        stack_size,
        stack_reserve,
        max_region_size,
    } = *layout;

    if stack_size == 0 || stack_size > stack_top {
        return Err(LoadError::Stack(format!(
            "stack of {stack_size:#x} bytes does not fit below {stack_top:#x}"
        )));
    }
    if stack_reserve >= stack_size {
        return Err(LoadError::Stack(format!(
            "reserve of {stack_reserve:#x} bytes leaves no room in a {stack_size:#x}-byte stack"
        )));
    }

    let base = stack_top - stack_size;
    let sp = (stack_top - stack_reserve) & !(STACK_ALIGN - 1);
    Ok((allocate(base, stack_size, max_region_size)?, sp))
}

/// Allocates a zeroed region, refusing sizes above `limit` or that the host
/// cannot back.
fn allocate(base: u64, size: u64, limit: u64) -> Result<Region, LoadError> {
    if size > limit {
        return Err(LoadError::RegionTooLarge { base, size, limit });
    }
    usize::try_from(size)
        .ok()
        .and_then(|len| Region::try_new(base, len).ok())
        .ok_or(LoadError::OutOfMemory { base, size })
}
