//! # ELF Loader Tests
//!
//! Images are produced by the in-tree ELF builder, so every header field the
//! loader looks at is under the test's control.

use std::io::Write;

use a64emu_core::common::{LoadError, MemoryError};
use a64emu_core::config::MemoryConfig;
use a64emu_core::sim::{LoadedImage, load_elf, load_elf_file};
use a64emu_core::soc::MemoryAccess;
use pretty_assertions::assert_eq;

use crate::common::builder::elf::{ElfBuilder, EM_X86_64};
use crate::common::builder::instruction::{NOP, RET, assemble};

const TEXT: u64 = 0x40_0000;

/// A small stack just below 8 MiB.
fn small_stack() -> MemoryConfig {
    MemoryConfig {
        stack_top: 0x80_0000,
        stack_size: 0x1_0000,
        stack_reserve: 0x100,
        ..MemoryConfig::default()
    }
}

fn load(elf: &[u8]) -> Result<LoadedImage, LoadError> {
    load_elf(elf, &small_stack())
}

// ═════════════════════════════════════════════════════════════════════════════
//  Placement
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn loads_single_segment() {
    let code = assemble(&[NOP, RET]);
    let elf = ElfBuilder::new(TEXT).load(TEXT, &code, code.len() as u64).build();

    let image = load(&elf).unwrap();
    assert_eq!(image.entry, TEXT);
    assert_eq!(image.initial_sp, 0x7F_FF00);
    assert_eq!(image.memory.read_u32(TEXT).unwrap(), NOP);
    assert_eq!(image.memory.read_u32(TEXT + 4).unwrap(), RET);

    let regions = image.memory.regions();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].base(), TEXT);
    assert_eq!(regions[0].size(), 0x1000);
    assert_eq!(regions[1].base(), 0x7F_0000);
    assert_eq!(regions[1].size(), 0x1_0000);
}

#[test]
fn bss_tail_is_zeroed_and_mapped() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &[0xAA; 8], 0x40).build();

    let image = load(&elf).unwrap();
    assert_eq!(image.memory.read_u64(TEXT).unwrap(), 0xAAAA_AAAA_AAAA_AAAA);
    assert_eq!(image.memory.read_u64(TEXT + 8).unwrap(), 0);
    assert_eq!(image.memory.read_u64(TEXT + 0x38).unwrap(), 0);
}

#[test]
fn segments_share_one_page_rounded_region() {
    let code = assemble(&[RET]);
    let elf = ElfBuilder::new(TEXT)
        .load(TEXT, &code, 4)
        .load(TEXT + 0x2000, &[1, 2, 3, 4], 0x100)
        .build();

    let image = load(&elf).unwrap();
    let region = image.memory.region_at(TEXT).unwrap();
    assert_eq!(region.base(), TEXT);
    assert_eq!(region.size(), 0x3000);
    assert_eq!(image.memory.read_u32(TEXT + 0x2000).unwrap(), 0x0403_0201);
    // The gap between segments is mapped and zero.
    assert_eq!(image.memory.read_u32(TEXT + 0x1000).unwrap(), 0);
}

#[test]
fn unaligned_segment_rounds_region_down() {
    let elf = ElfBuilder::new(TEXT + 0x10).load(TEXT + 0x10, &[0xFF; 4], 4).build();

    let image = load(&elf).unwrap();
    assert_eq!(image.memory.regions()[0].base(), TEXT);
    assert_eq!(image.memory.read_u32(TEXT + 0x10).unwrap(), u32::MAX);
}

#[test]
fn physical_addresses_win_when_they_differ() {
    let code = assemble(&[NOP, RET]);
    let elf = ElfBuilder::new(TEXT + 4)
        .load_at(TEXT, 0x10_0000, &code, code.len() as u64)
        .build();

    let image = load(&elf).unwrap();
    assert_eq!(image.entry, 0x10_0004);
    assert_eq!(image.memory.read_u32(0x10_0004).unwrap(), RET);
    assert!(image.memory.region_at(TEXT).is_none());
}

#[test]
fn default_stack_layout() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 4).build();

    let image = load_elf(&elf, &MemoryConfig::default()).unwrap();
    assert_eq!(image.initial_sp, 0x7FFF_FFFF_CE00);
    assert_eq!(image.initial_sp % 16, 0);
    let stack = image.memory.region_at(image.initial_sp).unwrap();
    assert_eq!(stack.end(), 0x8000_0000_0000);
}

#[test]
fn initial_sp_is_aligned_down() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 4).build();
    let layout = MemoryConfig {
        stack_reserve: 0x105,
        ..small_stack()
    };

    let image = load_elf(&elf, &layout).unwrap();
    assert_eq!(image.initial_sp, 0x7F_FEF0);
}

#[test]
fn loads_from_file() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 4).build();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&elf).unwrap();

    let image = load_elf_file(file.path(), &small_stack()).unwrap();
    assert_eq!(image.entry, TEXT);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Rejections
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_elf_file(dir.path().join("absent.elf"), &small_stack()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
}

#[test]
fn not_an_elf() {
    let err = load(b"this is not an executable at all, just some text").unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "{err:?}");
}

#[test]
fn wrong_machine() {
    let elf = ElfBuilder::new(TEXT).machine(EM_X86_64).load(TEXT, &[0; 4], 4).build();
    let err = load(&elf).unwrap_err();
    assert!(matches!(err, LoadError::WrongMachine { machine: 62 }), "{err:?}");
}

#[test]
fn big_endian() {
    let elf = ElfBuilder::new(TEXT).big_endian().load(TEXT, &[0; 4], 4).build();
    let err = load(&elf).unwrap_err();
    assert!(matches!(err, LoadError::BigEndian), "{err:?}");
}

#[test]
fn dynamically_linked() {
    let elf = ElfBuilder::new(TEXT)
        .interp("/lib/ld-linux-aarch64.so.1")
        .load(TEXT, &[0; 4], 4)
        .build();
    match load(&elf).unwrap_err() {
        LoadError::DynamicallyLinked { interp } => {
            assert_eq!(interp, "/lib/ld-linux-aarch64.so.1");
        }
        err => panic!("unexpected error {err:?}"),
    }
}

#[test]
fn no_loadable_segments() {
    let err = load(&ElfBuilder::new(TEXT).build()).unwrap_err();
    assert!(matches!(err, LoadError::NoLoadableSegments), "{err:?}");

    // A zero-sized PT_LOAD does not count.
    let err = load(&ElfBuilder::new(TEXT).load(TEXT, &[], 0).build()).unwrap_err();
    assert!(matches!(err, LoadError::NoLoadableSegments), "{err:?}");
}

#[test]
fn entry_outside_segments() {
    let elf = ElfBuilder::new(TEXT + 0x100).load(TEXT, &[0; 8], 8).build();
    let err = load(&elf).unwrap_err();
    assert!(
        matches!(err, LoadError::EntryOutsideImage { entry } if entry == TEXT + 0x100),
        "{err:?}"
    );
}

#[test]
fn file_data_larger_than_memory_size() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &[0; 16], 8).build();
    let err = load(&elf).unwrap_err();
    assert!(matches!(err, LoadError::BadSegment { addr } if addr == TEXT), "{err:?}");
}

#[test]
fn inconsistent_stack_layouts() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &[0; 4], 4).build();
    for layout in [
        MemoryConfig {
            stack_size: 0,
            ..small_stack()
        },
        MemoryConfig {
            stack_size: 0x100_0000,
            ..small_stack()
        },
        MemoryConfig {
            stack_reserve: 0x1_0000,
            ..small_stack()
        },
    ] {
        let err = load_elf(&elf, &layout).unwrap_err();
        assert!(matches!(err, LoadError::Stack(_)), "{layout:?}: {err:?}");
    }
}

#[test]
fn stack_colliding_with_image() {
    let elf = ElfBuilder::new(0x7F_8000).load(0x7F_8000, &[0; 4], 4).build();
    let err = load(&elf).unwrap_err();
    assert!(
        matches!(err, LoadError::Memory(MemoryError::Overlap { .. })),
        "{err:?}"
    );
}

// ═════════════════════════════════════════════════════════════════════════════
//  Region size limits
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn widely_separated_segments_are_refused() {
    let far = 0x7F00_0000_0000;
    let elf = ElfBuilder::new(TEXT)
        .load(TEXT, &assemble(&[RET]), 4)
        .load(far, &[0; 4], 4)
        .build();

    let err = load(&elf).unwrap_err();
    assert!(
        matches!(
            err,
            LoadError::RegionTooLarge { base: TEXT, size, limit }
                if size == far + 0x1000 - TEXT && limit == 1 << 30
        ),
        "{err:?}"
    );
}

#[test]
fn huge_bss_is_refused() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 1 << 40).build();
    let err = load(&elf).unwrap_err();
    assert!(matches!(err, LoadError::RegionTooLarge { .. }), "{err:?}");
}

#[test]
fn huge_stack_is_refused() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 4).build();
    let layout = MemoryConfig {
        stack_top: 0x7F00_0000_0000,
        stack_size: 0x7E00_0000_0000,
        ..small_stack()
    };

    let err = load_elf(&elf, &layout).unwrap_err();
    assert!(
        matches!(err, LoadError::RegionTooLarge { base: 0x100_0000_0000, .. }),
        "{err:?}"
    );
}

#[test]
fn region_limit_is_configurable() {
    let elf = ElfBuilder::new(TEXT).load(TEXT, &assemble(&[RET]), 0x2_0000).build();
    let tight = MemoryConfig {
        max_region_size: 0x1_0000,
        ..small_stack()
    };
    let err = load_elf(&elf, &tight).unwrap_err();
    assert!(
        matches!(err, LoadError::RegionTooLarge { size: 0x2_0000, limit: 0x1_0000, .. }),
        "{err:?}"
    );

    let roomy = MemoryConfig {
        max_region_size: 0x2_0000,
        ..small_stack()
    };
    let image = load_elf(&elf, &roomy).unwrap();
    assert_eq!(image.memory.region_at(TEXT).unwrap().size(), 0x2_0000);
}
