//! Bit-field extraction over 32-bit instruction words.
//!
//! Every function here is pure and total: given any `u32`, it returns a
//! value, never a `Result`. Field boundaries are given in Verilog
//! notation (`end:start`, inclusive, bit 0 is least significant).

/// Make an `n_bits`-long mask (all ones). `n_bits` must be in `1..=32`.
pub fn mask(n_bits: u32) -> u32 {
    if n_bits >= 32 {
        0xffff_ffff
    } else {
        (1u32 << n_bits) - 1
    }
}

/// Extract `value[end:start]` (Verilog notation) from `value`.
pub fn extract_field(value: u32, end: u32, start: u32) -> u32 {
    mask(end - start + 1) & (value >> start)
}

/// bits [6:0]
pub fn opcode(instr: u32) -> u32 {
    extract_field(instr, 6, 0)
}

/// bits [11:7]
pub fn rd(instr: u32) -> u32 {
    extract_field(instr, 11, 7)
}

/// bits [14:12]
pub fn funct3(instr: u32) -> u32 {
    extract_field(instr, 14, 12)
}

/// bits [19:15]
pub fn rs1(instr: u32) -> u32 {
    extract_field(instr, 19, 15)
}

/// bits [24:20]
pub fn rs2(instr: u32) -> u32 {
    extract_field(instr, 24, 20)
}

/// bits [31:25]
pub fn funct7(instr: u32) -> u32 {
    extract_field(instr, 31, 25)
}

/// bits [31:26], used to discriminate `slli`/`srli`/`srai`
pub fn funct6(instr: u32) -> u32 {
    extract_field(instr, 31, 26)
}

/// bits [25:20]. Only the low 5 bits are a legal RV32 shift amount;
/// bit 5 being set is an illegal-shift condition handled by the caller.
pub fn shamt(instr: u32) -> u32 {
    extract_field(instr, 25, 20)
}

/// Sign-extend the `n_bits`-wide unsigned quantity `value`, copying bit
/// `n_bits - 1` into every higher bit.
pub fn sign_extend(value: u32, n_bits: u32) -> i32 {
    let sign_bit_position = n_bits - 1;
    let sign_bit = 1 & (value >> sign_bit_position);
    let extended = if sign_bit == 1 {
        value | (0xffff_ffff - mask(sign_bit_position))
    } else {
        value
    };
    extended as i32
}

/// I-type immediate, bits [31:20], sign-extended to 32 bits.
pub fn imm_itype(instr: u32) -> i32 {
    sign_extend(extract_field(instr, 31, 20), 12)
}

/// S-type immediate, `{[31:25], [11:7]}`, sign-extended to 32 bits.
pub fn imm_stype(instr: u32) -> i32 {
    let imm11_5 = extract_field(instr, 31, 25);
    let imm4_0 = extract_field(instr, 11, 7);
    sign_extend((imm11_5 << 5) | imm4_0, 12)
}

/// B-type immediate, reconstructed from `{[31], [7], [30:25], [11:8]}`.
/// Unlike standard RV32, the low zero bit is not appended and the
/// result is not sign-extended — the resulting value is used directly
/// as an absolute instruction index.
pub fn imm_btype(instr: u32) -> u32 {
    let imm11 = extract_field(instr, 31, 31);
    let imm10 = extract_field(instr, 7, 7);
    let imm9_4 = extract_field(instr, 30, 25);
    let imm3_0 = extract_field(instr, 11, 8);
    (imm11 << 11) | (imm10 << 10) | (imm9_4 << 4) | imm3_0
}

/// U-type immediate, bits [31:12] placed back at bits [31:12].
pub fn imm_utype(instr: u32) -> u32 {
    extract_field(instr, 31, 12) << 12
}

/// J-type immediate, reconstructed from `{[31], [19:12], [20], [30:21]}`.
/// As with the B-type immediate, there is no trailing zero bit and no
/// sign extension — this layout departs from the standard RV32
/// J-immediate encoding, but is used directly as an absolute
/// instruction index.
pub fn imm_jtype(instr: u32) -> u32 {
    let imm19 = extract_field(instr, 31, 31);
    let imm18_11 = extract_field(instr, 19, 12);
    let imm10 = extract_field(instr, 20, 20);
    let imm9_0 = extract_field(instr, 30, 21);
    (imm19 << 18) | (imm18_11 << 11) | (imm10 << 10) | imm9_0
}
