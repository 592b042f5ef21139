//! Cipher transforms - pure text-to-text functions
//!
//! None of these are meant to protect anything. `xorbc` in particular is a
//! homegrown block-chaining XOR that only keeps casual readers out.

use std::sync::Arc;

use super::adapter::Transformed;
use crate::application::errors::CommandError;
use crate::domain::entities::{handler_fn, CommandHandler, Payload};
use crate::domain::traits::RandomSource;

/// Shift ASCII letters by 13 within their case
pub fn rot13(s: &str, _payload: &Payload) -> Result<Transformed, CommandError> {
    let text = s
        .chars()
        .map(|c| match c {
            'a'..='m' | 'A'..='M' => (c as u8 + 13) as char,
            'n'..='z' | 'N'..='Z' => (c as u8 - 13) as char,
            _ => c,
        })
        .collect::<String>();
    Ok(Transformed::text(text))
}

/// Reverse the input character by character
pub fn reverse(s: &str, _payload: &Payload) -> Result<Transformed, CommandError> {
    Ok(Transformed::text(s.chars().rev().collect::<String>()))
}

/// XOR with block chaining over character codes.
///
/// `key` and `iv` come from the payload; a missing `iv` is all zeroes. The
/// chaining value for each block offset is the last plaintext character seen
/// at that offset, so encrypting and decrypting with the same key and iv
/// gives back the input.
///
/// Codes are Unicode scalar values. An XOR result in the surrogate range
/// (`0xD800..=0xDFFF`) or above `0x10FFFF` is not a `char`, so such inputs
/// fail with [`CommandError::Validation`] instead of producing text. ASCII
/// input with an ASCII key and iv never hits this.
pub fn xor_block_chaining(
    decrypt: bool,
) -> impl Fn(&str, &Payload) -> Result<Transformed, CommandError> + Send + Sync + Copy + 'static {
    move |s: &str, payload: &Payload| {
        let key = char_codes(payload.param("key").unwrap_or_default());
        let mut iv = match payload.param("iv") {
            Some(iv) if !iv.is_empty() => char_codes(iv),
            _ => vec![0; key.len()],
        };
        if key.len() != iv.len() {
            return Err(CommandError::Validation(
                "Key and IV must be the same length".to_string(),
            ));
        }
        if key.is_empty() {
            return Err(CommandError::Validation("Key must not be empty".to_string()));
        }

        let log = format!(
            "{}(key: {}, iv: {})",
            payload.command,
            code_list(&key)?,
            code_list(&iv)?
        );

        let mut out = String::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            let o = i % key.len();
            let k = key[o] ^ iv[o];
            let code = if decrypt {
                iv[o] = c as u32 ^ k;
                iv[o]
            } else {
                iv[o] = c as u32;
                iv[o] ^ k
            };
            let ch = char::from_u32(code).ok_or_else(|| {
                CommandError::Validation(format!("Character code {code} cannot be represented as text"))
            })?;
            out.push(ch);
        }

        Ok(Transformed::with_log(out, log))
    }
}

/// Pick one random-pickable command of the owning module and run it as
/// `random:<name>`.
pub fn random_command(rng: Arc<dyn RandomSource>) -> CommandHandler {
    handler_fn(move |ctx, mut payload| {
        let choices = ctx.commands.random_pickable();
        if choices.is_empty() {
            return Err(CommandError::NotFound("no random-pickable command".to_string()));
        }
        let chosen = choices[rng.pick(choices.len()) % choices.len()].to_string();
        tracing::debug!("Random command picked: {}", chosen);

        payload.command = format!("random:{chosen}");
        let command = ctx
            .commands
            .get(&chosen)
            .ok_or_else(|| CommandError::NotFound(chosen.clone()))?;
        command.invoke(ctx, payload)
    })
}

fn char_codes(s: &str) -> Vec<u32> {
    s.chars().map(|c| c as u32).collect()
}

fn code_list(codes: &[u32]) -> Result<String, CommandError> {
    serde_json::to_string(codes).map_err(|e| CommandError::ExecutionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn xorbc(decrypt: bool, s: &str, key: &str, iv: Option<&str>) -> Result<Transformed, CommandError> {
        let name = if decrypt { "rxorbc" } else { "xorbc" };
        let mut payload = Payload::for_draft(name, s).with_param("key", key);
        if let Some(iv) = iv {
            payload = payload.with_param("iv", iv);
        }
        xor_block_chaining(decrypt)(s, &payload)
    }

    #[test]
    fn test_rot13() {
        let out = rot13("Hello, World! xyz", &Payload::default()).unwrap();
        assert_eq!(out.text, "Uryyb, Jbeyq! klm");
        assert_eq!(out.log, None);
    }

    #[test]
    fn test_reverse_keeps_multibyte_chars() {
        assert_eq!(reverse("añb", &Payload::default()).unwrap().text, "bña");
    }

    #[test]
    fn test_xorbc_known_vector() {
        let out = xorbc(false, "abc", "42", None).unwrap();
        assert_eq!(out.text, "UP6");
        assert_eq!(out.log.as_deref(), Some("xorbc(key: [52,50], iv: [0,0])"));

        let back = xorbc(true, "UP6", "42", None).unwrap();
        assert_eq!(back.text, "abc");
        assert_eq!(back.log.as_deref(), Some("rxorbc(key: [52,50], iv: [0,0])"));
    }

    #[test]
    fn test_xorbc_length_mismatch() {
        let err = xorbc(false, "abc", "42", Some("123")).unwrap_err();
        assert_eq!(err, CommandError::Validation("Key and IV must be the same length".to_string()));
        assert_eq!(err.to_string(), "Key and IV must be the same length");
    }

    #[test]
    fn test_xorbc_empty_key() {
        let err = xorbc(false, "abc", "", None).unwrap_err();
        assert_eq!(err, CommandError::Validation("Key must not be empty".to_string()));
    }

    #[test]
    fn test_xorbc_rejects_surrogate_result() {
        // 0x3861 ^ (0x61 ^ 0xE000) == 0xD800
        let err = xorbc(false, "\u{E000}\u{3861}", "a", None).unwrap_err();
        assert_eq!(
            err,
            CommandError::Validation("Character code 55296 cannot be represented as text".to_string())
        );
    }

    #[test]
    fn test_xorbc_empty_iv_means_zero() {
        let with_empty = xorbc(false, "secret", "ab", Some("")).unwrap();
        let without = xorbc(false, "secret", "ab", None).unwrap();
        assert_eq!(with_empty.text, without.text);
    }

    proptest! {
        #[test]
        fn prop_rot13_self_inverse(s in "[ -~]*") {
            let once = rot13(&s, &Payload::default()).unwrap().text;
            prop_assert_eq!(rot13(&once, &Payload::default()).unwrap().text, s);
        }

        #[test]
        fn prop_reverse_self_inverse(s in "\\PC*") {
            let once = reverse(&s, &Payload::default()).unwrap().text;
            prop_assert_eq!(reverse(&once, &Payload::default()).unwrap().text, s);
        }

        #[test]
        fn prop_xorbc_round_trip(
            (key, iv) in (1usize..8).prop_flat_map(|n| (
                proptest::collection::vec(0x20u8..0x7f, n),
                proptest::collection::vec(0x20u8..0x7f, n),
            )),
            s in "[ -~]*",
        ) {
            let key: String = key.into_iter().map(char::from).collect();
            let iv: String = iv.into_iter().map(char::from).collect();
            let enc = xorbc(false, &s, &key, Some(&iv)).unwrap().text;
            let dec = xorbc(true, &enc, &key, Some(&iv)).unwrap().text;
            prop_assert_eq!(dec, s);
        }

        #[test]
        fn prop_xorbc_round_trip_when_representable(s in "\\PC*", key in "[ -~]{1,6}") {
            if let Ok(enc) = xorbc(false, &s, &key, None) {
                let dec = xorbc(true, &enc.text, &key, None).unwrap().text;
                prop_assert_eq!(dec, s);
            }
        }
    }
}
