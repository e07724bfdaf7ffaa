use super::collector::FunctionCollector;
use super::errors::{GenerationError, Result};
use num_bigint::BigUint;
use num_traits::One;
use solgen_core::{EvmVersion, RevertStrings, Type, WORD_SIZE};
use tiny_keccak::{Hasher, Keccak};

/// Generator for shared helper functions. Each instance carries its own
/// settings but registers everything in the pool it was created with, so
/// helpers are deduplicated across all generators of one compilation.
pub struct UtilFunctions<'a> {
    evm_version: EvmVersion,
    revert_strings: RevertStrings,
    functions: &'a mut FunctionCollector,
}

impl<'a> UtilFunctions<'a> {
    pub fn new(
        evm_version: EvmVersion,
        revert_strings: RevertStrings,
        functions: &'a mut FunctionCollector,
    ) -> Self {
        Self {
            evm_version,
            revert_strings,
            functions,
        }
    }

    pub fn evm_version(&self) -> EvmVersion {
        self.evm_version
    }

    pub fn revert_strings(&self) -> RevertStrings {
        self.revert_strings
    }

    /// Code that reverts with `Error(message)` when `revert_strings` is one
    /// of the debug modes. Empty otherwise, and for an empty message.
    pub fn revert_reason_if_debug(revert_strings: RevertStrings, message: &str) -> String {
        if !revert_strings.is_debug() || message.is_empty() {
            return String::new();
        }

        let signature = BigUint::from_bytes_be(&selector("Error(string)")) << 224;
        let words: Vec<&[u8]> = message.as_bytes().chunks(WORD_SIZE).collect();

        let mut code = String::from("{\n");
        code.push_str(&format!("    mstore(0, {})\n", signature));
        code.push_str("    mstore(4, 0x20)\n");
        code.push_str(&format!("    mstore(add(4, 0x20), {})\n", message.len()));
        code.push_str("    let reasonPos := add(4, 0x40)\n");
        for (i, word) in words.iter().enumerate() {
            code.push_str(&format!(
                "    mstore(add(reasonPos, {}), {})\n",
                i * WORD_SIZE,
                format_as_string_or_number(word)
            ));
        }
        code.push_str(&format!(
            "    revert(0, add(reasonPos, {}))\n",
            words.len() * WORD_SIZE
        ));
        code.push_str("}\n");
        code
    }

    pub fn cleanup_function(&mut self, ty: &Type) -> Result<String> {
        if !has_valid_width(ty) {
            return Err(GenerationError::UnsupportedUtilityType {
                function: "cleanup",
                ty: ty.to_string(),
            });
        }

        let expression = match ty {
            Type::Bool => "iszero(iszero(value))".to_string(),
            Type::Uint(256) | Type::Int(256) | Type::FixedBytes(32) => "value".to_string(),
            Type::Uint(bits) => format!("and(value, {})", hex_mask(*bits as usize, 0)),
            Type::Int(bits) => format!("signextend({}, value)", (*bits as usize).div_ceil(8) - 1),
            Type::Address | Type::Contract(_) => format!("and(value, {})", hex_mask(160, 0)),
            Type::FixedBytes(n) => {
                let bits = *n as usize * 8;
                format!("and(value, {})", hex_mask(bits, 256 - bits))
            }
            other => {
                return Err(GenerationError::UnsupportedUtilityType {
                    function: "cleanup",
                    ty: other.to_string(),
                })
            }
        };

        let name = format!("cleanup_{}", ty.identifier());
        Ok(self.functions.create_function(&name, || {
            format!(
                "function {}(value) -> cleaned {{\n    cleaned := {}\n}}\n",
                name, expression
            )
        }))
    }

    pub fn overflow_check_add_function(&mut self, ty: &Type) -> Result<String> {
        let bits = match ty {
            Type::Uint(bits) if has_valid_width(ty) => *bits as usize,
            other => {
                return Err(GenerationError::UnsupportedUtilityType {
                    function: "checked addition",
                    ty: other.to_string(),
                })
            }
        };

        let cleanup = self.cleanup_function(ty)?;
        let revert = self.revert_on_failure("Arithmetic overflow");
        let name = format!("checked_add_{}", ty.identifier());
        Ok(self.functions.create_function(&name, || {
            let mut code = format!("function {}(x, y) -> sum {{\n", name);
            code.push_str(&format!("    x := {}(x)\n", cleanup));
            code.push_str(&format!("    y := {}(y)\n", cleanup));
            code.push_str(&format!(
                "    if gt(x, sub({}, y)) {{\n{}    }}\n",
                hex_mask(bits, 0),
                indent(&revert, 8)
            ));
            code.push_str("    sum := add(x, y)\n}\n");
            code
        }))
    }

    /// Revert statement for a failed check: the debug reason when enabled,
    /// otherwise a bare `revert(0, 0)`.
    pub fn revert_on_failure(&self, message: &str) -> String {
        let reason = Self::revert_reason_if_debug(self.revert_strings, message);
        if reason.is_empty() {
            "revert(0, 0)\n".to_string()
        } else {
            reason
        }
    }
}

/// Integer widths must be whole bytes between 8 and 256 bits, fixed bytes
/// between 1 and 32 bytes.
fn has_valid_width(ty: &Type) -> bool {
    match ty {
        Type::Uint(bits) | Type::Int(bits) => (8..=256).contains(bits) && bits % 8 == 0,
        Type::FixedBytes(n) => (1..=WORD_SIZE as u8).contains(n),
        _ => true,
    }
}

fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak::v256();
    hasher.update(signature.as_bytes());
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    [output[0], output[1], output[2], output[3]]
}

/// `bits` set bits shifted left by `shift`, as a hex literal.
fn hex_mask(bits: usize, shift: usize) -> String {
    let mask = ((BigUint::one() << bits) - BigUint::one()) << shift;
    format!("0x{:x}", mask)
}

/// A Yul literal for one word of a revert message: a string literal when the
/// bytes are plain printable ASCII, otherwise the word as a left-aligned hex number.
fn format_as_string_or_number(word: &[u8]) -> String {
    let printable = word
        .iter()
        .all(|&b| (0x20..=0x7e).contains(&b) && b != b'"' && b != b'\\');
    if printable {
        return format!("\"{}\"", String::from_utf8_lossy(word));
    }

    let mut padded = [0u8; WORD_SIZE];
    padded[..word.len()].copy_from_slice(word);
    let hex: String = padded.iter().map(|b| format!("{:02x}", b)).collect();
    format!("0x{}", hex)
}

fn indent(code: &str, width: usize) -> String {
    let prefix = " ".repeat(width);
    code.lines()
        .map(|line| format!("{}{}\n", prefix, line))
        .collect()
}
