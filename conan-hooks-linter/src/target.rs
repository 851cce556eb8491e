//! Which binary format and architecture a package's settings call for.

use crate::analyzer::{Architecture, BinaryFormat};

/// Expected format for one target operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier {
    pub os: String,
    pub format: BinaryFormat,
}

impl Verifier {
    /// `None` when there is no verifier for `os` (or no `os` at all).
    pub fn for_os(os: Option<&str>) -> Option<Self> {
        let os = os?;
        let format = match os {
            "Linux" | "FreeBSD" | "SunOS" | "Android" | "Neutrino" => BinaryFormat::Elf,
            "Windows" | "WindowsStore" | "WindowsCE" => BinaryFormat::Pe,
            "Macos" | "iOS" | "watchOS" | "tvOS" => BinaryFormat::MachO,
            _ => return None,
        };
        Some(Self {
            os: os.to_string(),
            format,
        })
    }
}

/// Map an `arch` setting to the machine type binaries must carry.
///
/// Unknown settings yield `None` and skip the architecture check.
pub fn expected_architecture(arch: Option<&str>) -> Option<Architecture> {
    let arch = arch?;
    match arch {
        "x86" => Some(Architecture::X86),
        "x86_64" => Some(Architecture::X86_64),
        a if a.starts_with("armv8") => Some(Architecture::AArch64),
        a if a.starts_with("armv7") || a.starts_with("armv6") || a.starts_with("armv5") => {
            Some(Architecture::Arm)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Linux", BinaryFormat::Elf)]
    #[case("Android", BinaryFormat::Elf)]
    #[case("Windows", BinaryFormat::Pe)]
    #[case("Macos", BinaryFormat::MachO)]
    #[case("iOS", BinaryFormat::MachO)]
    fn known_os_has_verifier(#[case] os: &str, #[case] format: BinaryFormat) {
        assert_eq!(Verifier::for_os(Some(os)).map(|v| v.format), Some(format));
    }

    #[test]
    fn unknown_or_missing_os_has_none() {
        assert!(Verifier::for_os(None).is_none());
        assert!(Verifier::for_os(Some("Emscripten")).is_none());
    }

    #[rstest]
    #[case(Some("x86"), Some(Architecture::X86))]
    #[case(Some("x86_64"), Some(Architecture::X86_64))]
    #[case(Some("armv8"), Some(Architecture::AArch64))]
    #[case(Some("armv8_32"), Some(Architecture::AArch64))]
    #[case(Some("armv7hf"), Some(Architecture::Arm))]
    #[case(Some("ppc64le"), None)]
    #[case(None, None)]
    fn arch_settings(#[case] arch: Option<&str>, #[case] expected: Option<Architecture>) {
        assert_eq!(expected_architecture(arch), expected);
    }
}
