//! The `Vm`: owns instruction memory, the register file, and the bus,
//! and runs the fetch-decode-execute loop.

use std::fs;

use crate::bus::Bus;
use crate::device::Device;
use crate::diagnostics::Diagnostics;
use crate::error::VmError;
use crate::exec;
use crate::instr::Instr;
use crate::registers::RegisterFile;

/// A single hart: instruction memory, register file, bus, program
/// counter, and the verbose/diagnostics channel.
///
/// Devices are registered with [`Vm::register_device`] before
/// [`Vm::run`] is called; `run` executes until `SLEEP`, an out-of-range
/// PC, or an out-of-range jump/branch target, and then returns. VM
/// state can be inspected afterwards but execution cannot resume.
pub struct Vm<'a> {
    instructions: Vec<u32>,
    registers: RegisterFile,
    bus: Bus<'a>,
    pc: u32,
    diag: Diagnostics,
    jumped: bool,
    halted: bool,
}

impl<'a> Vm<'a> {
    /// Load `path` as a raw little-endian 32-bit instruction stream.
    /// `active_count` (register count) must already be validated into
    /// `[1, 32]` by the caller.
    pub fn new(path: &str, active_count: usize, verbose: bool) -> Result<Self, VmError> {
        if !(1..=32).contains(&active_count) {
            return Err(VmError::InvalidRegisterCount(active_count));
        }
        let bytes = fs::read(path).map_err(|source| VmError::BinaryOpen {
            path: path.to_string(),
            source,
        })?;
        if bytes.len() % 4 != 0 {
            return Err(VmError::MisalignedBinaryLength(bytes.len() as u64));
        }
        let instructions = bytes
            .chunks_exact(4)
            .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
            .collect();
        Ok(Self {
            instructions,
            registers: RegisterFile::new(active_count),
            bus: Bus::new(),
            pc: 0,
            diag: Diagnostics::new(verbose),
            jumped: false,
            halted: false,
        })
    }

    /// Register `device` at `[begin, end]`. Returns `false` if the
    /// range overlaps an already-registered device.
    pub fn register_device(&mut self, device: &'a mut dyn Device, begin: u32, end: u32) -> bool {
        self.bus.register_device(device, begin, end)
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn is_verbose(&self) -> bool {
        self.diag.verbose()
    }

    /// Run until `SLEEP`, an out-of-range PC, or an out-of-range
    /// jump/branch target.
    pub fn run(&mut self) {
        while !self.halted && (self.pc as usize) < self.instructions.len() {
            let pc = self.pc;
            let word = self.instructions[pc as usize];
            self.jumped = false;
            self.diag.trace_start(pc);

            match Instr::decode(word) {
                Ok(instruction) => exec::execute(self, instruction),
                Err(_) => self.warn("unknown opcode"),
            }

            if self.halted {
                break;
            }
            if !self.jumped {
                self.set_pc(pc.wrapping_add(1));
            }
        }
    }

    /// Validate and commit a jump to instruction index `target`. On
    /// success, marks this step as having taken an explicit jump so the
    /// driver loop does not also advance the PC. On failure, warns and
    /// halts the VM. Used both for ordinary PC advancement and for
    /// branch/jump targets.
    pub fn set_pc(&mut self, target: u32) -> bool {
        if (target as usize) >= self.instructions.len() {
            self.warn(&format!(
                "program counter went out of range (0d{target}), stopping virtual machine"
            ));
            self.halted = true;
            false
        } else {
            self.pc = target;
            self.jumped = true;
            true
        }
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn read_reg(&self, idx: u8) -> i32 {
        self.registers.read(idx, self.pc, &self.diag)
    }

    pub fn write_reg(&mut self, idx: u8, value: i32) {
        self.registers.write(idx, value, self.pc, &self.diag)
    }

    pub fn bus_read(&mut self, addr: u32) -> i32 {
        self.bus.read(addr, self.pc, &self.diag)
    }

    pub fn bus_write(&mut self, addr: u32, word: i32) {
        self.bus.write(addr, word, self.pc, &self.diag)
    }

    pub fn warn(&self, message: &str) {
        self.diag.warn(self.pc, message);
    }

    pub fn info(&self, message: &str) {
        self.diag.info(self.pc, message);
    }

    pub fn trace(&self, message: &str) {
        self.diag.trace(message);
    }
}
