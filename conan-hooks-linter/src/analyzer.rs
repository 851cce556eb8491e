//! Binary introspection.
//!
//! [`BinaryAnalyzer`] is the seam for the binary-analysis capability; the
//! built-in [`ObjectAnalyzer`] hands whole files to `goblin` and keeps the
//! format, word size and machine types.

use std::fmt;

use goblin::elf::header::{EM_386, EM_AARCH64, EM_ARM, EM_X86_64};
use goblin::mach::cputype::{CPU_TYPE_ARM, CPU_TYPE_ARM64, CPU_TYPE_X86, CPU_TYPE_X86_64};
use goblin::mach::{Mach, MultiArch};
use goblin::pe::header::{
    COFF_MACHINE_ARM, COFF_MACHINE_ARM64, COFF_MACHINE_ARMNT, COFF_MACHINE_X86,
    COFF_MACHINE_X86_64,
};
use goblin::Object;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFormat {
    Elf,
    Pe,
    MachO,
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryFormat::Elf => "ELF",
            BinaryFormat::Pe => "PE",
            BinaryFormat::MachO => "Mach-O",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86,
    X86_64,
    Arm,
    AArch64,
    /// Machine code the analyzer does not name; the raw header value.
    Other(u32),
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X86 => f.write_str("x86"),
            Architecture::X86_64 => f.write_str("x86_64"),
            Architecture::Arm => f.write_str("arm"),
            Architecture::AArch64 => f.write_str("aarch64"),
            Architecture::Other(code) => write!(f, "machine {code:#x}"),
        }
    }
}

/// What the analyzer learned about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryInfo {
    pub format: BinaryFormat,
    /// Word size, when the file states one.
    pub bits: Option<u8>,
    /// More than one entry only for universal Mach-O files.
    pub architectures: Vec<Architecture>,
}

impl fmt::Display for BinaryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format)?;
        if let Some(bits) = self.bits {
            write!(f, " {bits}-bit")?;
        }
        let archs: Vec<String> = self.architectures.iter().map(ToString::to_string).collect();
        write!(f, " [{}]", archs.join(", "))
    }
}

/// Introspects the contents of a file.
pub trait BinaryAnalyzer {
    /// `None` when the bytes are not a recognised binary.
    fn analyze(&self, bytes: &[u8]) -> Option<BinaryInfo>;
}

/// ELF / PE / Mach-O analyzer backed by `goblin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectAnalyzer;

impl BinaryAnalyzer for ObjectAnalyzer {
    fn analyze(&self, bytes: &[u8]) -> Option<BinaryInfo> {
        let object = match Object::parse(bytes) {
            Ok(object) => object,
            Err(err) => {
                tracing::trace!(error = %err, "not a parseable binary");
                return None;
            }
        };

        match object {
            Object::Elf(elf) => Some(BinaryInfo {
                format: BinaryFormat::Elf,
                bits: Some(word_size(elf.is_64)),
                architectures: vec![elf_arch(elf.header.e_machine)],
            }),
            Object::PE(pe) => Some(BinaryInfo {
                format: BinaryFormat::Pe,
                bits: pe
                    .header
                    .optional_header
                    .is_some()
                    .then(|| word_size(pe.is_64)),
                architectures: vec![pe_arch(pe.header.coff_header.machine)],
            }),
            Object::Mach(Mach::Binary(macho)) => Some(BinaryInfo {
                format: BinaryFormat::MachO,
                bits: Some(word_size(macho.is_64)),
                architectures: vec![macho_arch(macho.header.cputype)],
            }),
            Object::Mach(Mach::Fat(multi)) => fat_info(&multi),
            _ => None,
        }
    }
}

/// Java class files share the fat magic; their arch count is the class version.
const MAX_FAT_ARCHS: usize = 20;

fn fat_info(multi: &MultiArch<'_>) -> Option<BinaryInfo> {
    if multi.narches == 0 || multi.narches >= MAX_FAT_ARCHS {
        return None;
    }
    let architectures = multi
        .iter_arches()
        .map(|arch| arch.map(|a| macho_arch(a.cputype)))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Some(BinaryInfo {
        format: BinaryFormat::MachO,
        bits: None,
        architectures,
    })
}

fn word_size(is_64: bool) -> u8 {
    if is_64 {
        64
    } else {
        32
    }
}

fn elf_arch(machine: u16) -> Architecture {
    match machine {
        EM_386 => Architecture::X86,
        EM_X86_64 => Architecture::X86_64,
        EM_ARM => Architecture::Arm,
        EM_AARCH64 => Architecture::AArch64,
        other => Architecture::Other(u32::from(other)),
    }
}

fn pe_arch(machine: u16) -> Architecture {
    match machine {
        COFF_MACHINE_X86 => Architecture::X86,
        COFF_MACHINE_X86_64 => Architecture::X86_64,
        COFF_MACHINE_ARM | COFF_MACHINE_ARMNT => Architecture::Arm,
        COFF_MACHINE_ARM64 => Architecture::AArch64,
        other => Architecture::Other(u32::from(other)),
    }
}

fn macho_arch(cputype: u32) -> Architecture {
    match cputype {
        CPU_TYPE_X86 => Architecture::X86,
        CPU_TYPE_X86_64 => Architecture::X86_64,
        CPU_TYPE_ARM => Architecture::Arm,
        CPU_TYPE_ARM64 => Architecture::AArch64,
        other => Architecture::Other(other),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn analyze(bytes: &[u8]) -> Option<BinaryInfo> {
        ObjectAnalyzer.analyze(bytes)
    }

    #[test]
    fn elf_x86_64() {
        let info = analyze(&elf(64, 0x3e)).expect("elf");
        assert_eq!(info.format, BinaryFormat::Elf);
        assert_eq!(info.bits, Some(64));
        assert_eq!(info.architectures, [Architecture::X86_64]);
    }

    #[test]
    fn elf_big_endian_machine() {
        let info = analyze(&elf_with_endian(32, 0x28, true)).expect("elf");
        assert_eq!(info.bits, Some(32));
        assert_eq!(info.architectures, [Architecture::Arm]);
    }

    #[test]
    fn pe_amd64() {
        let info = analyze(&pe(0x8664)).expect("pe");
        assert_eq!(info.format, BinaryFormat::Pe);
        assert_eq!(info.bits, Some(64));
        assert_eq!(info.architectures, [Architecture::X86_64]);
    }

    #[test]
    fn pe_headers_past_first_page() {
        let info = analyze(&pe_at(0x8664, true, 0x1200)).expect("pe");
        assert_eq!(info.architectures, [Architecture::X86_64]);
    }

    #[test]
    fn pe_word_size_comes_from_optional_header() {
        // RISC-V 64: a machine this crate does not name.
        let info = analyze(&pe_at(0x5064, true, 0x80)).expect("pe");
        assert_eq!(info.bits, Some(64));
        assert_eq!(info.architectures, [Architecture::Other(0x5064)]);
    }

    #[test]
    fn mz_without_pe_signature_is_not_binary() {
        let mut h = pe(0x8664);
        h[0x80..0x84].copy_from_slice(b"NE\0\0");
        assert!(analyze(&h).is_none());
    }

    #[test]
    fn macho_arm64() {
        let info = analyze(&macho64(0x0100_000c)).expect("macho");
        assert_eq!(info.format, BinaryFormat::MachO);
        assert_eq!(info.bits, Some(64));
        assert_eq!(info.architectures, [Architecture::AArch64]);
    }

    #[test]
    fn universal_macho_lists_every_slice() {
        let info = analyze(&fat(&[0x0100_0007, 0x0100_000c])).expect("fat");
        assert_eq!(info.architectures, [Architecture::X86_64, Architecture::AArch64]);
        assert_eq!(info.to_string(), "Mach-O [x86_64, aarch64]");
    }

    #[test]
    fn java_class_file_is_not_universal_binary() {
        let mut class = 0xcafe_babeu32.to_be_bytes().to_vec();
        class.extend_from_slice(&[0, 0, 0, 52]);
        class.resize(64, 0);
        assert!(analyze(&class).is_none());
    }

    #[test]
    fn text_and_truncated_files_are_ignored() {
        assert!(analyze(b"#include <zlib.h>\n").is_none());
        assert!(analyze(b"\x7fEL").is_none());
        assert!(analyze(b"").is_none());
    }
}
