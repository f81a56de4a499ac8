//! Structured operator schemas.
//!
//! A [`FunctionSchema`] is the parsed form of a declaration such as
//! `aten::add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor`.
//! `Display` renders the full declaration back (overload, defaults, alias
//! annotations); the registry's canonical signature is a separate, lossier
//! rendering.

use std::fmt;

use smallvec::SmallVec;

use crate::Symbol;

/// Type of an argument or return value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// A leaf type such as `Tensor`, `int`, `Scalar`.
    Named(Box<str>),
    /// `T?`
    Optional(Box<SchemaType>),
    /// `T[]` or `T[N]`
    List {
        elem: Box<SchemaType>,
        len: Option<u32>,
    },
    /// `Tuple(A, B)`
    Tuple(Vec<SchemaType>),
    /// `Dict(K, V)`
    Dict(Box<SchemaType>, Box<SchemaType>),
    /// `Future(T)`
    Future(Box<SchemaType>),
}

impl SchemaType {
    pub fn named(name: impl Into<Box<str>>) -> Self {
        SchemaType::Named(name.into())
    }

    #[must_use]
    pub fn optional(self) -> Self {
        SchemaType::Optional(Box::new(self))
    }

    #[must_use]
    pub fn list(self) -> Self {
        SchemaType::List {
            elem: Box::new(self),
            len: None,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Named(name) => f.write_str(name),
            SchemaType::Optional(inner) => write!(f, "{inner}?"),
            SchemaType::List { elem, len: None } => write!(f, "{elem}[]"),
            SchemaType::List {
                elem,
                len: Some(n),
            } => write!(f, "{elem}[{n}]"),
            SchemaType::Tuple(elems) => {
                f.write_str("Tuple(")?;
                write_joined(f, elems)?;
                f.write_str(")")
            }
            SchemaType::Dict(key, value) => write!(f, "Dict({key}, {value})"),
            SchemaType::Future(inner) => write!(f, "Future({inner})"),
        }
    }
}

/// Alias annotation such as `(a)`, `(a!)` or `(a|b -> *)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AliasInfo {
    pub sets: SmallVec<[Box<str>; 1]>,
    pub is_write: bool,
    /// Set the value belongs to after the call (`*` is the wildcard set).
    pub after: Option<Box<str>>,
}

impl fmt::Display for AliasInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(set)?;
        }
        if self.is_write {
            f.write_str("!")?;
        }
        if let Some(after) = &self.after {
            write!(f, " -> {after}")?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Argument {
    pub name: Box<str>,
    pub ty: SchemaType,
    /// Default value, kept as written.
    pub default: Option<Box<str>>,
    pub kwarg_only: bool,
    pub alias: Option<AliasInfo>,
}

impl Argument {
    pub fn new(name: impl Into<Box<str>>, ty: SchemaType) -> Self {
        Argument {
            name: name.into(),
            ty,
            default: None,
            kwarg_only: false,
            alias: None,
        }
    }

    #[must_use]
    pub fn kwarg_only(mut self) -> Self {
        self.kwarg_only = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Box<str>>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if let Some(alias) = &self.alias {
            write!(f, "{alias}")?;
        }
        write!(f, " {}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Return {
    pub name: Option<Box<str>>,
    pub ty: SchemaType,
    pub alias: Option<AliasInfo>,
}

impl Return {
    pub fn new(ty: SchemaType) -> Self {
        Return {
            name: None,
            ty,
            alias: None,
        }
    }
}

impl fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if let Some(alias) = &self.alias {
            write!(f, "{alias}")?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

/// Parsed operator schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSchema {
    name: Symbol,
    overload_name: Box<str>,
    arguments: Vec<Argument>,
    returns: SmallVec<[Return; 1]>,
    is_vararg: bool,
    is_varret: bool,
}

impl FunctionSchema {
    pub fn new(
        name: Symbol,
        overload_name: impl Into<Box<str>>,
        arguments: Vec<Argument>,
        returns: Vec<Return>,
    ) -> Self {
        FunctionSchema {
            name,
            overload_name: overload_name.into(),
            arguments,
            returns: SmallVec::from_vec(returns),
            is_vararg: false,
            is_varret: false,
        }
    }

    /// Mark the argument list as open-ended (`...`).
    #[must_use]
    pub fn with_vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }

    /// Mark the return arity as undescribed (`-> ...`).
    #[must_use]
    pub fn with_varret(mut self) -> Self {
        self.is_varret = true;
        self
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn overload_name(&self) -> &str {
        &self.overload_name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn returns(&self) -> &[Return] {
        &self.returns
    }

    pub fn is_vararg(&self) -> bool {
        self.is_vararg
    }

    /// True for non-schematized operators, whose outputs the schema does
    /// not describe.
    pub fn is_varret(&self) -> bool {
        self.is_varret
    }
}

impl fmt::Display for FunctionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.overload_name.is_empty() {
            write!(f, ".{}", self.overload_name)?;
        }
        f.write_str("(")?;
        let mut seen_kwarg_only = false;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if arg.kwarg_only && !seen_kwarg_only {
                f.write_str("*, ")?;
                seen_kwarg_only = true;
            }
            write!(f, "{arg}")?;
        }
        if self.is_vararg {
            if !self.arguments.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("...")?;
        }
        f.write_str(") -> ")?;
        if self.is_varret {
            return f.write_str("...");
        }
        match self.returns.as_slice() {
            [single] if single.name.is_none() => write!(f, "{single}"),
            returns => {
                f.write_str("(")?;
                write_joined(f, returns)?;
                f.write_str(")")
            }
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
