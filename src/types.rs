//! Suffix-derived type tags.
//!
//! Every identifier in Glyph carries its type in its final character: `i`
//! for int, `s` for string, `b` for bool, `o` for an unconstrained object,
//! `f` for a function, `v` for void (valid only as a function's declared
//! return type) and a single uppercase ASCII letter for an object
//! constrained to that interface.

use std::fmt;

/// A structural type tag, independent of any particular interface's field
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    String,
    Bool,
    /// `Void` only ever appears as a function's declared return type; no
    /// value ever carries it.
    Void,
    /// `None` means an unconstrained `o`-suffixed object; `Some(letter)`
    /// means the object must satisfy that single-letter interface.
    Object(Option<char>),
    Function,
}

impl TypeTag {
    /// Derive a tag from an identifier's suffix, for contexts where `void`
    /// is not a legal answer (parameter types, variable types).
    pub fn from_identifier_suffix(name: &str) -> Option<TypeTag> {
        let tag = Self::from_identifier_suffix_allow_void(name)?;
        if tag == TypeTag::Void {
            None
        } else {
            Some(tag)
        }
    }

    /// Derive a tag from an identifier's suffix, allowing `void` (used for
    /// function names, whose suffix gives the declared return type).
    pub fn from_identifier_suffix_allow_void(name: &str) -> Option<TypeTag> {
        let last = name.chars().last()?;
        Some(match last {
            'i' => TypeTag::Int,
            's' => TypeTag::String,
            'b' => TypeTag::Bool,
            'o' => TypeTag::Object(None),
            'f' => TypeTag::Function,
            'v' => TypeTag::Void,
            c if c.is_ascii_uppercase() => TypeTag::Object(Some(c)),
            _ => return None,
        })
    }

    /// Parse a type tag from one of the written-out type names used in
    /// return-type/`convert` position (`int`, `string`, `bool`, `void`,
    /// `object`, or a bare interface letter).
    pub fn from_type_name(name: &str) -> Option<TypeTag> {
        Some(match name {
            "int" => TypeTag::Int,
            "string" => TypeTag::String,
            "bool" => TypeTag::Bool,
            "void" => TypeTag::Void,
            "object" => TypeTag::Object(None),
            "function" => TypeTag::Function,
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() || !c.is_ascii_uppercase() {
                    return None;
                }
                TypeTag::Object(Some(c))
            }
        })
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeTag::Object(_))
    }

    /// The interface letter constraining this tag, if any.
    pub fn interface(&self) -> Option<char> {
        match self {
            TypeTag::Object(Some(c)) => Some(*c),
            _ => None,
        }
    }

    /// The coarse kind used to key the overload table: two parameters with
    /// different interface constraints but the same underlying kind
    /// (`Object(Some('N'))` vs. `Object(None)`) collide as the same
    /// overload, exactly as an unconstrained-vs-constrained pair of object
    /// parameters would in the original interpreter's `(name, param_types)`
    /// table.
    pub fn param_kind(&self) -> ParamKind {
        match self {
            TypeTag::Int => ParamKind::Int,
            TypeTag::String => ParamKind::String,
            TypeTag::Bool => ParamKind::Bool,
            TypeTag::Void => unreachable!("void is never a parameter type"),
            TypeTag::Object(_) => ParamKind::Object,
            TypeTag::Function => ParamKind::Function,
        }
    }
}

/// A parameter's full signature for interface conformance purposes (a
/// func-field check): declared type *and* `ref` flag, both compared
/// position-by-position against the interface's requirement. Plain overload
/// resolution (`FunctionTable`) only ever needs the bare `TypeTag`/`ParamKind`
/// — `ref`-ness is not part of a call's overload key — so this lives
/// alongside those rather than replacing them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSig {
    pub type_tag: TypeTag,
    pub is_ref: bool,
}

/// The coarse kind a parameter's declared type reduces to for overload
/// resolution purposes. See [`TypeTag::param_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int,
    String,
    Bool,
    Object,
    Function,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Void => write!(f, "void"),
            TypeTag::Object(None) => write!(f, "object"),
            TypeTag::Object(Some(c)) => write!(f, "{c}"),
            TypeTag::Function => write!(f, "function"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_maps_scalars() {
        assert_eq!(TypeTag::from_identifier_suffix("counti"), Some(TypeTag::Int));
        assert_eq!(TypeTag::from_identifier_suffix("names"), Some(TypeTag::String));
        assert_eq!(TypeTag::from_identifier_suffix("flagb"), Some(TypeTag::Bool));
        assert_eq!(TypeTag::from_identifier_suffix("thingo"), Some(TypeTag::Object(None)));
        assert_eq!(TypeTag::from_identifier_suffix("callbackf"), Some(TypeTag::Function));
    }

    #[test]
    fn suffix_rejects_void_unless_allowed() {
        assert_eq!(TypeTag::from_identifier_suffix("piv"), None);
        assert_eq!(
            TypeTag::from_identifier_suffix_allow_void("piv"),
            Some(TypeTag::Void)
        );
    }

    #[test]
    fn suffix_maps_interface_letter() {
        assert_eq!(TypeTag::from_identifier_suffix("nodeN"), Some(TypeTag::Object(Some('N'))));
    }

    #[test]
    fn type_name_roundtrips_display() {
        for tag in [TypeTag::Int, TypeTag::String, TypeTag::Bool, TypeTag::Void, TypeTag::Object(None), TypeTag::Object(Some('Q'))] {
            let rendered = tag.to_string();
            assert_eq!(TypeTag::from_type_name(&rendered), Some(tag));
        }
    }
}
