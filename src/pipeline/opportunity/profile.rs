use serde::{Deserialize, Serialize};

/// Read-only view of the veteran's current disability profile.
///
/// Injected into the opportunity generator; the pipeline never owns or
/// mutates it.
pub trait DisabilityProfile: Send + Sync {
    /// Names of conditions already claimed or rated.
    fn claimed_conditions(&self) -> Vec<String>;

    /// Case-insensitive substring match in either direction against every
    /// claimed condition name.
    fn is_already_claimed(&self, condition: &str) -> bool {
        let needle = condition.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.claimed_conditions().iter().any(|name| {
            let name = name.trim().to_lowercase();
            !name.is_empty() && (name.contains(&needle) || needle.contains(&name))
        })
    }
}

/// Profile backed by a fixed list of condition names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticDisabilityProfile {
    pub conditions: Vec<String>,
}

impl StaticDisabilityProfile {
    pub fn new<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
    }
}

impl DisabilityProfile for StaticDisabilityProfile {
    fn claimed_conditions(&self) -> Vec<String> {
        self.conditions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case() {
        let profile = StaticDisabilityProfile::new(["Tinnitus"]);
        assert!(profile.is_already_claimed("tinnitus"));
    }

    #[test]
    fn label_inside_profile_name() {
        let profile = StaticDisabilityProfile::new(["Lumbar strain with radiculopathy"]);
        assert!(profile.is_already_claimed("LUMBAR STRAIN"));
    }

    #[test]
    fn profile_name_inside_label() {
        let profile = StaticDisabilityProfile::new(["asthma"]);
        assert!(profile.is_already_claimed("exercise-induced asthma"));
    }

    #[test]
    fn unrelated_condition_not_claimed() {
        let profile = StaticDisabilityProfile::new(["tinnitus", "left knee"]);
        assert!(!profile.is_already_claimed("migraine"));
    }

    #[test]
    fn empty_values_never_match() {
        let profile = StaticDisabilityProfile::new(["", "  "]);
        assert!(!profile.is_already_claimed("migraine"));
        assert!(!StaticDisabilityProfile::new(["migraine"]).is_already_claimed("  "));
        assert!(!StaticDisabilityProfile::default().is_already_claimed("migraine"));
    }
}
