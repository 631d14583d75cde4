use super::{EvalError, Object, Result};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x100_0000_01b3;

/// Canonical encoding of a value in a map's key slot: the object's type tag
/// plus 64 bits derived from its content. Integers contribute their bits,
/// booleans 0 or 1, strings an FNV-1a digest of their UTF-8 bytes. Anything
/// else cannot occupy a key slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    tag: &'static str,
    value: u64,
}

impl HashKey {
    pub fn from_object(obj: &Object) -> Result<Self> {
        let value = match obj {
            Object::Integer(n) => *n as u64,
            Object::Boolean(true) => 1,
            Object::Boolean(false) => 0,
            Object::String(s) => fnv1a(s.as_bytes()),
            _ => {
                return Err(EvalError::NotHashable {
                    type_name: obj.type_name(),
                })
            }
        };

        Ok(Self {
            tag: obj.type_name(),
            value,
        })
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_equal_values_share_a_key() {
        let cases = [
            (Object::Integer(42), Object::Integer(42)),
            (Object::Boolean(true), Object::Boolean(true)),
            (Object::from("hello"), Object::from("hello")),
        ];

        for (a, b) in cases.iter() {
            assert_eq!(
                HashKey::from_object(a).unwrap(),
                HashKey::from_object(b).unwrap()
            );
        }
    }

    #[test]
    fn test_distinct_values_get_distinct_keys() {
        let cases = [
            (Object::Integer(1), Object::Integer(2)),
            (Object::Boolean(true), Object::Boolean(false)),
            (Object::from("one"), Object::from("two")),
            // same payload bits, different type tag
            (Object::Integer(1), Object::Boolean(true)),
        ];

        for (a, b) in cases.iter() {
            assert_ne!(
                HashKey::from_object(a).unwrap(),
                HashKey::from_object(b).unwrap(),
                "{} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_fnv1a_reference_vectors() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_unhashable_objects_are_rejected() {
        let cases = [
            Object::Null,
            Object::Array(vec![Object::Integer(1)]),
            Object::Hash(Default::default()),
        ];

        for obj in cases.iter() {
            assert_eq!(
                HashKey::from_object(obj).unwrap_err(),
                EvalError::NotHashable {
                    type_name: obj.type_name()
                }
            );
        }
    }
}
