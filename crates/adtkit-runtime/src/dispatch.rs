//! Runtime-checked case analysis over union members.
//!
//! ```
//! use adtkit_runtime::{Match, Value, build_product_type};
//!
//! let circle = build_product_type("Circle", ["r"]).unwrap();
//! let c = Value::from(circle.construct([2]).unwrap());
//! let area = Match::on(&c)
//!     .case(&circle, |c| Ok(3 * c.get("r")?.try_int()? * c.get("r")?.try_int()?))
//!     .finish()
//!     .unwrap();
//! assert_eq!(area, 12);
//! ```

use smallvec::SmallVec;

use crate::error::{AdtErrorKind, AdtResult};
use crate::instance::Instance;
use crate::types::{AdtType, TypeKey, VariantType};
use crate::union::{UnionType, is_member};
use crate::value::Value;

/// Arms are tried in order; the first one whose type the scrutinee belongs to
/// wins and later arms are skipped.
#[must_use = "a match does nothing until `finish` is called"]
pub struct Match<'v, R> {
    value: &'v Value,
    scope: Option<UnionType>,
    handled: SmallVec<[TypeKey; 4]>,
    outcome: Option<AdtResult<R>>,
}

impl<'v, R> Match<'v, R> {
    pub fn on(value: &'v Value) -> Self {
        Match {
            value,
            scope: None,
            handled: SmallVec::new(),
            outcome: None,
        }
    }

    /// Like [`Match::on`], but a fall-through reports which members of
    /// `union` had no arm.
    pub fn within(union: UnionType, value: &'v Value) -> Self {
        Match {
            scope: Some(union),
            ..Match::on(value)
        }
    }

    pub fn case(
        mut self,
        ty: impl Into<AdtType>,
        arm: impl FnOnce(&Instance) -> AdtResult<R>,
    ) -> Self {
        let ty = ty.into();
        self.handled.push(ty.key());
        if self.outcome.is_none() && is_member(self.value, &ty) {
            if let Some(instance) = self.value.as_instance() {
                self.outcome = Some(arm(instance));
            }
        }
        self
    }

    /// Catch-all arm, used when no earlier arm matched.
    pub fn otherwise(mut self, arm: impl FnOnce(&Value) -> AdtResult<R>) -> Self {
        if self.outcome.is_none() {
            self.outcome = Some(arm(self.value));
        }
        self
    }

    pub fn finish(self) -> AdtResult<R> {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let mut context = String::new();
        if let Some(union) = &self.scope {
            context.push_str(&format!(" in union {union}"));
            let mut expected: Vec<&VariantType> = union.members().iter().collect();
            for (_, constant) in union.constants() {
                if !expected.contains(&constant.variant()) {
                    expected.push(constant.variant());
                }
            }
            let unhandled: Vec<String> = expected
                .into_iter()
                .filter(|ty| !self.handled.contains(&ty.key()))
                .map(ToString::to_string)
                .collect();
            if !unhandled.is_empty() && !self.handled.contains(&union.key()) {
                context.push_str(&format!(" (no arm for {})", unhandled.join(", ")));
            }
        }
        Err(AdtErrorKind::NoMatchingVariant {
            value: self.value.repr().to_string(),
            context,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::build_product_type;
    use crate::singleton::build_singleton_type;
    use insta::assert_snapshot;

    #[test]
    fn first_matching_arm_wins() {
        let leaf = build_product_type("Leaf", ["v"]).unwrap();
        let node = build_product_type("Node", ["l", "r"]).unwrap();
        let tree = UnionType::builder("Tree")
            .variant(&leaf)
            .variant(&node)
            .build()
            .unwrap();

        let v = Value::from(leaf.construct([7]).unwrap());
        let got = tree
            .dispatch(&v)
            .case(&node, |_| Ok("node"))
            .case(&tree, |_| Ok("tree"))
            .case(&leaf, |_| Ok("leaf"))
            .finish()
            .unwrap();
        assert_eq!(got, "tree");
    }

    #[test]
    fn fall_through_names_unhandled_members() {
        let on = build_singleton_type("On");
        let off = build_singleton_type("Off");
        let switch = UnionType::builder("Switch")
            .variant(&on)
            .variant(&off)
            .build()
            .unwrap();

        let v = Value::from(off.instance());
        let err = switch
            .dispatch::<()>(&v)
            .case(&on, |_| Ok(()))
            .finish()
            .unwrap_err();
        assert_snapshot!(err.to_string(), @"no case matched Off() in union Switch (no arm for Off)");

        let fallback = switch
            .dispatch(&v)
            .case(&on, |_| Ok(1))
            .otherwise(|_| Ok(0))
            .finish()
            .unwrap();
        assert_eq!(fallback, 0);
    }

    #[test]
    fn constant_types_count_as_expected_arms() {
        let rgb = build_product_type("Rgb", ["r", "g", "b"]).unwrap();
        let red = rgb.construct([1, 0, 0]).unwrap();
        let color = UnionType::builder("Tint").member("Red", &red).build().unwrap();

        let v = Value::from(&red);
        let err = color.dispatch::<()>(&v).finish().unwrap_err();
        assert_snapshot!(err.to_string(), @"no case matched Rgb(1,0,0) in union Tint (no arm for Rgb)");
        assert_eq!(color.dispatch(&v).case(&color, |_| Ok(1)).finish().unwrap(), 1);
    }

    #[test]
    fn plain_values_never_match_a_type() {
        let point = build_product_type("P", ["x"]).unwrap();
        let err = Match::<()>::on(&Value::from("x"))
            .case(&point, |_| Ok(()))
            .finish()
            .unwrap_err();
        assert_snapshot!(err.to_string(), @"no case matched 'x'");
    }
}
