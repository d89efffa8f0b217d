//! A64 instruction encoders.
//!
//! Each function assembles one encoding from its fields. Register arguments
//! are raw 5-bit indices, so 31 means SP or XZR depending on the instruction.

/// Register index 31.
pub const R31: u32 = 31;

/// ADD/ADDS/SUB/SUBS (immediate).
pub fn add_sub_imm(
    sf: bool,
    sub: bool,
    set_flags: bool,
    shift: bool,
    imm12: u32,
    rn: u32,
    rd: u32,
) -> u32 {
    (sf as u32) << 31
        | (sub as u32) << 30
        | (set_flags as u32) << 29
        | 0b100010 << 23
        | (shift as u32) << 22
        | (imm12 & 0xFFF) << 10
        | (rn & 0x1F) << 5
        | (rd & 0x1F)
}

/// `add xd, xn, #imm12`
pub fn add_x(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(true, false, false, false, imm12, rn, rd)
}

/// `adds xd, xn, #imm12`
pub fn adds_x(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(true, false, true, false, imm12, rn, rd)
}

/// `sub xd, xn, #imm12`
pub fn sub_x(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(true, true, false, false, imm12, rn, rd)
}

/// `subs xd, xn, #imm12`
pub fn subs_x(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(true, true, true, false, imm12, rn, rd)
}

/// `add wd, wn, #imm12`
pub fn add_w(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(false, false, false, false, imm12, rn, rd)
}

/// `adds wd, wn, #imm12`
pub fn adds_w(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(false, false, true, false, imm12, rn, rd)
}

/// `subs wd, wn, #imm12`
pub fn subs_w(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_sub_imm(false, true, true, false, imm12, rn, rd)
}

/// Logical (immediate). `opc`: 0 AND, 1 ORR, 2 EOR, 3 ANDS.
pub fn logical_imm(sf: bool, opc: u32, n: bool, immr: u32, imms: u32, rn: u32, rd: u32) -> u32 {
    (sf as u32) << 31
        | (opc & 0b11) << 29
        | 0b100100 << 23
        | (n as u32) << 22
        | (immr & 0x3F) << 16
        | (imms & 0x3F) << 10
        | (rn & 0x1F) << 5
        | (rd & 0x1F)
}

/// ADR (`page = false`) or ADRP (`page = true`) with a 21-bit offset.
pub fn adr(page: bool, imm21: i32, rd: u32) -> u32 {
    let imm = imm21 as u32 & 0x1F_FFFF;
    (page as u32) << 31 | (imm & 0b11) << 29 | 0b10000 << 24 | (imm >> 2) << 5 | (rd & 0x1F)
}

/// ADDG/SUBG with every field explicit.
#[allow(clippy::too_many_arguments)]
pub fn add_sub_tags(
    sf: bool,
    sub: bool,
    set_flags: bool,
    o2: bool,
    uimm6: u32,
    uimm4: u32,
    rn: u32,
    rd: u32,
) -> u32 {
    (sf as u32) << 31
        | (sub as u32) << 30
        | (set_flags as u32) << 29
        | 0b100011 << 23
        | (o2 as u32) << 22
        | (uimm6 & 0x3F) << 16
        | (uimm4 & 0xF) << 10
        | (rn & 0x1F) << 5
        | (rd & 0x1F)
}

/// Move wide. `opc`: 0 MOVN, 2 MOVZ, 3 MOVK.
pub fn move_wide(sf: bool, opc: u32, hw: u32, imm16: u32, rd: u32) -> u32 {
    (sf as u32) << 31
        | (opc & 0b11) << 29
        | 0b100101 << 23
        | (hw & 0b11) << 21
        | (imm16 & 0xFFFF) << 5
        | (rd & 0x1F)
}

/// Bitfield move. `opc`: 0 SBFM, 1 BFM, 2 UBFM.
pub fn bitfield(sf: bool, opc: u32, n: bool, immr: u32, imms: u32, rn: u32, rd: u32) -> u32 {
    (sf as u32) << 31
        | (opc & 0b11) << 29
        | 0b100110 << 23
        | (n as u32) << 22
        | (immr & 0x3F) << 16
        | (imms & 0x3F) << 10
        | (rn & 0x1F) << 5
        | (rd & 0x1F)
}

/// EXTR with every field explicit.
#[allow(clippy::too_many_arguments)]
pub fn extract(
    sf: bool,
    op21: u32,
    n: bool,
    o0: bool,
    rm: u32,
    imms: u32,
    rn: u32,
    rd: u32,
) -> u32 {
    (sf as u32) << 31
        | (op21 & 0b11) << 29
        | 0b100111 << 23
        | (n as u32) << 22
        | (o0 as u32) << 21
        | (rm & 0x1F) << 16
        | (imms & 0x3F) << 10
        | (rn & 0x1F) << 5
        | (rd & 0x1F)
}

/// `ret`
pub const RET: u32 = 0xd65f_03c0;

/// `svc #0`
pub const SVC_0: u32 = 0xd400_0001;

/// `nop`
pub const NOP: u32 = 0xd503_201f;

/// Serializes instruction words little-endian.
pub fn assemble(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}
