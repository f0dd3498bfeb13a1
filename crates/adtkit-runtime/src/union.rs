//! Tagged unions over product and singleton variants.
//!
//! Membership is recorded once by the binder and never changed afterwards.
//! Two relation tables hold it:
//!
//! - variant types (open constructors and singletons) map to their union, so
//!   every instance of a bound type is a member;
//! - enumerated constants map to their union by instance identity, so an
//!   equal value built later is not a member.
//!
//! A variant type or constant belongs to at most one union; binding it to a
//! second union fails.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::dispatch::Match;
use crate::error::{AdtError, AdtErrorKind, AdtResult};
use crate::instance::Instance;
use crate::method::{Method, MethodTable};
use crate::product::ProductType;
use crate::singleton::SingletonType;
use crate::symbol::Symbol;
use crate::types::{AdtType, TypeKey, VariantType};
use crate::value::Value;

/// Variant type -> the union it is bound to.
static BINDINGS: LazyLock<DashMap<TypeKey, UnionType>> = LazyLock::new(DashMap::new);

/// Enumerated constant, by instance identity -> its type and union.
static CONSTANTS: LazyLock<DashMap<usize, (TypeKey, UnionType)>> = LazyLock::new(DashMap::new);

/// Serializes binders so validation and insertion of one union's members
/// cannot interleave with another binder.
static BIND_LOCK: Mutex<()> = Mutex::new(());

/// The union `key` is bound to, if any.
pub fn union_of(key: TypeKey) -> Option<UnionType> {
    BINDINGS.get(&key).map(|entry| entry.value().clone())
}

/// The union `instance` is bound to as an enumerated constant, if any.
pub(crate) fn constant_union(instance: &Instance) -> Option<UnionType> {
    CONSTANTS
        .get(&instance.addr())
        .map(|entry| entry.value().1.clone())
}

/// A union already holding a constant of type `key`.
fn constant_owner(key: TypeKey) -> Option<UnionType> {
    CONSTANTS
        .iter()
        .find(|entry| entry.value().0 == key)
        .map(|entry| entry.value().1.clone())
}

/// Whether `value` is an instance of `target`.
///
/// For a product or singleton target this is exact type identity. For a union
/// target it holds when the value's own type is bound to that union, or when
/// the value is one of the union's enumerated constants. Siblings inside one
/// union never satisfy each other, and plain values are never members of
/// anything.
pub fn is_member(value: &Value, target: impl Into<AdtType>) -> bool {
    let Some(instance) = value.as_instance() else {
        return false;
    };
    let own = instance.variant().key();
    match target.into() {
        AdtType::Union(union) => union_of(own)
            .or_else(|| constant_union(instance))
            .is_some_and(|bound| bound.key() == union.key()),
        other => own == other.key(),
    }
}

/// Bind `members` into a new union named `name` carrying `methods`.
///
/// Each member is a `(name, spec)` pair; see [`MemberSpec`].
pub fn bind_union<N, M>(
    name: impl Into<Symbol>,
    methods: MethodTable,
    members: impl IntoIterator<Item = (N, M)>,
) -> AdtResult<UnionType>
where
    N: Into<Symbol>,
    M: Into<MemberSpec>,
{
    let mut builder = UnionType::builder(name);
    builder.methods = methods;
    for (member, spec) in members {
        builder = builder.member(member, spec);
    }
    builder.build()
}

/// What a union member is declared as.
#[derive(Clone, Debug)]
pub enum MemberSpec {
    /// An open constructor.
    Product(ProductType),
    /// A singleton, exposed under the member name.
    Singleton(SingletonType),
    /// An enumerated constant. Must be an instance; only that very instance
    /// becomes a member, not its type.
    Value(Value),
}

impl From<ProductType> for MemberSpec {
    fn from(ty: ProductType) -> Self {
        MemberSpec::Product(ty)
    }
}

impl From<&ProductType> for MemberSpec {
    fn from(ty: &ProductType) -> Self {
        MemberSpec::Product(ty.clone())
    }
}

impl From<SingletonType> for MemberSpec {
    fn from(ty: SingletonType) -> Self {
        MemberSpec::Singleton(ty)
    }
}

impl From<&SingletonType> for MemberSpec {
    fn from(ty: &SingletonType) -> Self {
        MemberSpec::Singleton(ty.clone())
    }
}

impl From<VariantType> for MemberSpec {
    fn from(ty: VariantType) -> Self {
        match ty {
            VariantType::Product(ty) => MemberSpec::Product(ty),
            VariantType::Singleton(ty) => MemberSpec::Singleton(ty),
        }
    }
}

impl From<Value> for MemberSpec {
    fn from(value: Value) -> Self {
        MemberSpec::Value(value)
    }
}

impl From<Instance> for MemberSpec {
    fn from(instance: Instance) -> Self {
        MemberSpec::Value(Value::Instance(instance))
    }
}

impl From<&Instance> for MemberSpec {
    fn from(instance: &Instance) -> Self {
        MemberSpec::Value(Value::Instance(instance.clone()))
    }
}

#[derive(Clone)]
pub struct UnionType(Arc<UnionTypeData>);

struct UnionTypeData {
    key: TypeKey,
    name: Symbol,
    methods: MethodTable,
    variants: Vec<(Symbol, VariantType)>,
    constants: Vec<(Symbol, Instance)>,
    /// Every variant type bound to this union. Constants bind no type.
    members: Vec<VariantType>,
}

impl UnionType {
    pub fn builder(name: impl Into<Symbol>) -> UnionBuilder {
        UnionBuilder {
            name: name.into(),
            methods: MethodTable::new(),
            members: Vec::new(),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.0.key
    }

    pub fn name(&self) -> Symbol {
        self.0.name
    }

    /// Methods shared by every member.
    pub fn methods(&self) -> &MethodTable {
        &self.0.methods
    }

    pub fn variant(&self, name: &str) -> Option<&VariantType> {
        self.0
            .variants
            .iter()
            .find(|(member, _)| *member == name)
            .map(|(_, ty)| ty)
    }

    /// A named constant or the instance of a named singleton member.
    pub fn value(&self, name: &str) -> Option<Instance> {
        if let Some((_, constant)) = self.0.constants.iter().find(|(member, _)| *member == name) {
            return Some(constant.clone());
        }
        self.variant(name)
            .and_then(VariantType::as_singleton)
            .map(SingletonType::instance)
    }

    /// Named open constructors and singleton members, in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = (Symbol, &VariantType)> + '_ {
        self.0.variants.iter().map(|(name, ty)| (*name, ty))
    }

    pub fn constants(&self) -> impl Iterator<Item = (Symbol, &Instance)> + '_ {
        self.0.constants.iter().map(|(name, value)| (*name, value))
    }

    /// Variant types bound to this union. The types of constants are not
    /// included unless they were also added as variants.
    pub fn members(&self) -> &[VariantType] {
        &self.0.members
    }

    pub fn contains(&self, value: &Value) -> bool {
        is_member(value, self)
    }

    /// Start a case analysis over `value` scoped to this union.
    pub fn dispatch<'v, R>(&self, value: &'v Value) -> Match<'v, R> {
        Match::within(self.clone(), value)
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for UnionType {}

impl Hash for UnionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.name())?;
        for (i, ty) in self.0.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{ty}")?;
        }
        for (i, (name, _)) in self.0.constants.iter().enumerate() {
            if i > 0 || !self.0.members.is_empty() {
                f.write_str(" | ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

pub struct UnionBuilder {
    name: Symbol,
    methods: MethodTable,
    members: Vec<PendingMember>,
}

struct PendingMember {
    name: Symbol,
    spec: MemberSpec,
    /// Set by [`UnionBuilder::member`]; a named singleton displays as its member name.
    renamed: bool,
}

enum Resolved {
    Variant(Symbol, VariantType, bool),
    Constant(Symbol, Instance),
}

impl UnionBuilder {
    /// Add a method shared by every member.
    pub fn method(
        mut self,
        name: impl Into<Symbol>,
        f: impl Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Method::new(f));
        self
    }

    /// Add a variant under its own type name.
    pub fn variant(mut self, ty: impl Into<VariantType>) -> Self {
        let ty = ty.into();
        self.members.push(PendingMember {
            name: ty.name(),
            spec: ty.into(),
            renamed: false,
        });
        self
    }

    /// Add a member under an explicit name.
    pub fn member(mut self, name: impl Into<Symbol>, spec: impl Into<MemberSpec>) -> Self {
        self.members.push(PendingMember {
            name: name.into(),
            spec: spec.into(),
            renamed: true,
        });
        self
    }

    /// Validate every member, then record all bindings at once.
    ///
    /// On error nothing is bound and no display name is changed.
    pub fn build(self) -> AdtResult<UnionType> {
        let _guard = BIND_LOCK.lock();

        let resolved = self.resolve()?;
        let mut variants = Vec::new();
        let mut constants = Vec::new();
        let mut renamed: SmallVec<[(SingletonType, Symbol); 4]> = SmallVec::new();
        for entry in resolved {
            match entry {
                Resolved::Variant(name, ty, rename) => {
                    if let (true, VariantType::Singleton(singleton)) = (rename, &ty) {
                        renamed.push((singleton.clone(), name));
                    }
                    variants.push((name, ty));
                }
                Resolved::Constant(name, instance) => constants.push((name, instance)),
            }
        }

        for (_, ty) in &variants {
            if let Some(existing) = union_of(ty.key()).or_else(|| constant_owner(ty.key())) {
                return Err(self.rebinding(ty.name(), &existing));
            }
        }
        for (name, instance) in &constants {
            let own = instance.variant().key();
            let listed = variants.iter().any(|(_, ty)| ty.key() == own);
            let existing = constant_union(instance).or_else(|| {
                if listed { None } else { union_of(own) }
            });
            if let Some(existing) = existing {
                return Err(self.rebinding(*name, &existing));
            }
        }
        let members: Vec<VariantType> = variants.iter().map(|(_, ty)| ty.clone()).collect();

        let union = UnionType(Arc::new(UnionTypeData {
            key: TypeKey::fresh(),
            name: self.name,
            methods: self.methods,
            variants,
            constants,
            members,
        }));
        for ty in union.members() {
            BINDINGS.insert(ty.key(), union.clone());
        }
        for (_, instance) in union.constants() {
            CONSTANTS.insert(instance.addr(), (instance.variant().key(), union.clone()));
        }
        for (singleton, name) in renamed {
            if !singleton.set_display_override(name) {
                trace!(singleton = %singleton.name(), "display name already set");
            }
        }
        for (_, ty) in union.variants() {
            if let VariantType::Singleton(singleton) = ty {
                singleton.instance();
            }
        }

        debug!(
            union = %union.name(),
            variants = union.0.variants.len(),
            constants = union.0.constants.len(),
            "bound union"
        );
        Ok(union)
    }

    fn rebinding(&self, member: Symbol, existing: &UnionType) -> AdtError {
        AdtErrorKind::MultipleUnionBinding {
            variant: member,
            existing: existing.name(),
            requested: self.name,
        }
        .into()
    }

    fn resolve(&self) -> AdtResult<Vec<Resolved>> {
        let mut resolved: Vec<Resolved> = Vec::with_capacity(self.members.len());
        for (i, member) in self.members.iter().enumerate() {
            if self.members[..i].iter().any(|prev| prev.name == member.name) {
                return Err(AdtError::invalid_variant(
                    self.name,
                    member.name,
                    "member name is declared more than once",
                ));
            }
            let entry = match &member.spec {
                MemberSpec::Product(ty) => {
                    Resolved::Variant(member.name, VariantType::Product(ty.clone()), member.renamed)
                }
                MemberSpec::Singleton(ty) => Resolved::Variant(
                    member.name,
                    VariantType::Singleton(ty.clone()),
                    member.renamed,
                ),
                MemberSpec::Value(Value::Instance(instance)) => {
                    Resolved::Constant(member.name, instance.clone())
                }
                MemberSpec::Value(other) => {
                    return Err(AdtError::invalid_variant(
                        self.name,
                        member.name,
                        format!(
                            "expected a product type, a singleton type or an instance, got {}",
                            other.repr()
                        ),
                    ));
                }
            };
            let listed_twice = resolved.iter().any(|prev| match (prev, &entry) {
                (Resolved::Variant(_, a, _), Resolved::Variant(_, b, _)) => a == b,
                (Resolved::Constant(_, a), Resolved::Constant(_, b)) => a.ptr_eq(b),
                _ => false,
            });
            if listed_twice {
                let what = match &entry {
                    Resolved::Variant(_, ty, _) => format!("variant {ty}"),
                    Resolved::Constant(_, instance) => format!("constant {instance}"),
                };
                return Err(AdtError::invalid_variant(
                    self.name,
                    member.name,
                    format!("{what} is listed more than once"),
                ));
            }
            resolved.push(entry);
        }
        Ok(resolved)
    }
}
