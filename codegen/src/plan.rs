//! Generation plans: one resolved unit of output per capability specification.
//!
//! Planning is total. Every shape the generator cannot serve (no required
//! capability, too many optional ones) is rejected during extraction.

use crate::extract::CapabilitySpecification;
use crate::model::{AnonymousComposite, CapabilityRef, NamedComposite};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    func_name: String,
    required: AnonymousComposite,
    parameter: NamedComposite,
    wrapped: NamedComposite,
    optional: Vec<CapabilityRef>,
}

impl GenerationPlan {
    /// Name of the emitted factory function.
    pub fn func_name(&self) -> &str {
        &self.func_name
    }

    /// Capabilities every input is assumed to have; never probed.
    pub fn required(&self) -> &AnonymousComposite {
        &self.required
    }

    /// Parameter and return type of the factory.
    ///
    /// The single required capability itself, or `<Target>Required` declared
    /// next to the factory when there are several.
    pub fn parameter(&self) -> &NamedComposite {
        &self.parameter
    }

    /// The fully capable view produced by the caller's `wrap` callback.
    pub fn wrapped(&self) -> &NamedComposite {
        &self.wrapped
    }

    pub fn optional(&self) -> &[CapabilityRef] {
        &self.optional
    }
}

pub fn build_plan(spec: &CapabilitySpecification) -> GenerationPlan {
    let func_name = spec
        .func_name
        .clone()
        .unwrap_or_else(|| format!("{}Wrapper", spec.target));

    let parameter = spec.required.named(format!("{}Required", spec.target));

    let members = spec
        .required
        .members()
        .iter()
        .chain(&spec.optional)
        .cloned()
        .collect();
    // the target trait is the user's own declaration
    let wrapped = NamedComposite::new(spec.target.as_str(), members, true);

    GenerationPlan {
        func_name,
        required: spec.required.clone(),
        parameter,
        wrapped,
        optional: spec.optional.clone(),
    }
}

pub fn build_plans(specs: &[CapabilitySpecification]) -> Vec<GenerationPlan> {
    specs.iter().map(build_plan).collect()
}
