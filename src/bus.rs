//! The address-mapped bus: an ordered collection of disjoint address
//! ranges, each bound to a device.
//!
//! Overlap rejection gives "no two ranges contain a common point"
//! uniqueness, implemented here with a plain sorted `Vec` rather than a
//! tree keyed by an overlap-as-equal comparator.

use std::ops::RangeInclusive;

use crate::device::Device;
use crate::diagnostics::Diagnostics;

struct Binding<'a> {
    range: RangeInclusive<u32>,
    device: &'a mut dyn Device,
}

/// An ordered collection of disjoint `[begin, end]` address ranges,
/// each bound to a non-owning device reference. Bindings are inserted
/// before `Vm::run` begins and never removed.
#[derive(Default)]
pub struct Bus<'a> {
    bindings: Vec<Binding<'a>>,
}

impl<'a> Bus<'a> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Insert `device` at `[begin, end]`. Returns `false` (and leaves
    /// the bus unchanged) if the new range overlaps an existing one.
    pub fn register_device(&mut self, device: &'a mut dyn Device, begin: u32, end: u32) -> bool {
        debug_assert!(begin <= end);
        let overlaps = self
            .bindings
            .iter()
            .any(|b| begin <= *b.range.end() && *b.range.start() <= end);
        if overlaps {
            return false;
        }
        self.bindings.push(Binding {
            range: begin..=end,
            device,
        });
        self.bindings.sort_by_key(|b| *b.range.start());
        true
    }

    fn find(&mut self, addr: u32) -> Option<&mut Binding<'a>> {
        self.bindings.iter_mut().find(|b| b.range.contains(&addr))
    }

    /// Read the word at `addr`. Unmapped addresses warn and return 0.
    pub fn read(&mut self, addr: u32, pc: u32, diag: &Diagnostics) -> i32 {
        let begin = match self.find(addr) {
            Some(binding) => *binding.range.start(),
            None => {
                diag.warn(pc, &format!("read from undefined memory address 0x{addr:04x}"));
                return 0;
            }
        };
        let binding = self.find(addr).expect("checked above");
        binding.device.read(addr - begin)
    }

    /// Write `word` to `addr`. Unmapped addresses warn and the write
    /// is dropped.
    pub fn write(&mut self, addr: u32, word: i32, pc: u32, diag: &Diagnostics) {
        let begin = match self.find(addr) {
            Some(binding) => *binding.range.start(),
            None => {
                diag.warn(pc, &format!("write to undefined memory address 0x{addr:04x}"));
                return;
            }
        };
        let binding = self.find(addr).expect("checked above");
        binding.device.write(addr - begin, word);
    }
}
