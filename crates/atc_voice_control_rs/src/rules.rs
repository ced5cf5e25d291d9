//! Command categories and the author rule set, plus the filter deciding which
//! templates are well-formed enough to compile.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::grammar::ElementKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display, Serialize, Deserialize,
)]
pub enum Category {
    Status,
    Takeoff,
    Landing,
    FlyHeading,
    VectorToNamedWaypoint,
    VectorToSpelledWaypoint,
    /// Grammar name without a known prefix.
    Invalid,
}

/// Categories a template can belong to, in the order grammars are compiled.
pub const COMMANDS: [Category; 6] = [
    Category::Status,
    Category::Takeoff,
    Category::Landing,
    Category::VectorToNamedWaypoint,
    Category::VectorToSpelledWaypoint,
    Category::FlyHeading,
];

impl Category {
    /// Three letter prefix of the compiled grammar names.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Category::Status => Some("AGS"),
            Category::Takeoff => Some("ATO"),
            Category::Landing => Some("ALD"),
            Category::FlyHeading => Some("AFH"),
            Category::VectorToNamedWaypoint => Some("AVD"),
            Category::VectorToSpelledWaypoint => Some("AVW"),
            Category::Invalid => None,
        }
    }

    /// Recovers the category from the first three characters of a grammar
    /// name. Anything unknown is [`Category::Invalid`].
    pub fn from_grammar_name(name: &str) -> Self {
        let Some(prefix) = name.get(..3) else {
            return Category::Invalid;
        };
        Category::iter()
            .find(|category| category.code() == Some(prefix))
            .unwrap_or(Category::Invalid)
    }

    pub fn required_elements(&self) -> &'static [ElementKind] {
        match self {
            Category::Status => &[ElementKind::Aircraft],
            Category::Takeoff | Category::Landing => &[ElementKind::Aircraft, ElementKind::Runway],
            Category::FlyHeading => &[ElementKind::Aircraft, ElementKind::Heading],
            Category::VectorToNamedWaypoint => {
                &[ElementKind::Aircraft, ElementKind::WaypointNamed]
            }
            Category::VectorToSpelledWaypoint => {
                &[ElementKind::Aircraft, ElementKind::WaypointSpelled]
            }
            Category::Invalid => &[],
        }
    }

    /// A template is accepted iff every required marker occurs exactly once,
    /// counted as plain substrings.
    pub fn accepts(&self, template: &str) -> bool {
        *self != Category::Invalid
            && self
                .required_elements()
                .iter()
                .all(|kind| template.matches(kind.marker().as_str()).count() == 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub category: Category,
    pub text: String,
}

/// The six template lists as the host sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    #[serde(rename = "AircraftStatRules")]
    pub status: Vec<String>,
    #[serde(rename = "AircraftTakeoffRules")]
    pub takeoff: Vec<String>,
    #[serde(rename = "AircraftLandingRules")]
    pub landing: Vec<String>,
    #[serde(rename = "AircraftFlyHeadingRules")]
    pub fly_heading: Vec<String>,
    #[serde(rename = "AircraftVectorToDestinationWaypointRules")]
    pub vector_to_named_waypoint: Vec<String>,
    #[serde(rename = "AircraftVectorToNormalWaypointRules")]
    pub vector_to_spelled_waypoint: Vec<String>,
}

impl RuleSet {
    pub fn templates(&self, category: Category) -> &[String] {
        match category {
            Category::Status => &self.status,
            Category::Takeoff => &self.takeoff,
            Category::Landing => &self.landing,
            Category::FlyHeading => &self.fly_heading,
            Category::VectorToNamedWaypoint => &self.vector_to_named_waypoint,
            Category::VectorToSpelledWaypoint => &self.vector_to_spelled_waypoint,
            Category::Invalid => &[],
        }
    }

    fn templates_mut(&mut self, category: Category) -> Option<&mut Vec<String>> {
        match category {
            Category::Status => Some(&mut self.status),
            Category::Takeoff => Some(&mut self.takeoff),
            Category::Landing => Some(&mut self.landing),
            Category::FlyHeading => Some(&mut self.fly_heading),
            Category::VectorToNamedWaypoint => Some(&mut self.vector_to_named_waypoint),
            Category::VectorToSpelledWaypoint => Some(&mut self.vector_to_spelled_waypoint),
            Category::Invalid => None,
        }
    }

    pub fn push(&mut self, category: Category, template: impl Into<String>) {
        if let Some(templates) = self.templates_mut(category) {
            templates.push(template.into());
        }
    }

    /// All templates in compile order.
    pub fn iter(&self) -> impl Iterator<Item = CommandTemplate> + '_ {
        COMMANDS.into_iter().flat_map(move |category| {
            self.templates(category).iter().map(move |text| CommandTemplate {
                category,
                text: text.clone(),
            })
        })
    }

    pub fn len(&self) -> usize {
        COMMANDS
            .iter()
            .map(|category| self.templates(*category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps only templates containing each marker their category requires
    /// exactly once. Dropped templates are not an error.
    pub fn filtered(&self) -> RuleSet {
        let mut accepted = RuleSet::default();
        for category in COMMANDS {
            let templates = self.templates(category);
            let kept: Vec<String> = templates
                .iter()
                .filter(|template| category.accepts(template))
                .cloned()
                .collect();
            let dropped = templates.len() - kept.len();
            if dropped > 0 {
                log::debug!("Dropped {dropped} malformed {category} template(s)");
            }
            if let Some(slot) = accepted.templates_mut(category) {
                *slot = kept;
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_round_trip() {
        for category in COMMANDS {
            let code = category.code().unwrap();
            assert_eq!(Category::from_grammar_name(&format!("{code}0")), category);
            assert_eq!(Category::from_grammar_name(&format!("{code}12")), category);
        }
        assert_eq!(Category::from_grammar_name("XYZ0"), Category::Invalid);
        assert_eq!(Category::from_grammar_name("AG"), Category::Invalid);
        assert_eq!(Category::from_grammar_name(""), Category::Invalid);
    }

    #[test]
    fn test_duplicate_marker_is_dropped() {
        assert!(!Category::Status.accepts("{Aircraft} {Aircraft} requests taxi"));
        assert!(!Category::Status.accepts("requests taxi"));
        assert!(Category::Status.accepts("{Aircraft} say intentions"));
    }

    #[test]
    fn test_every_required_marker_counted() {
        assert!(Category::Takeoff.accepts("{Aircraft} {Runway} cleared for takeoff"));
        assert!(!Category::Takeoff.accepts("{Aircraft} cleared for takeoff"));
        assert!(!Category::Takeoff.accepts("{Aircraft} {Runway} cleared for takeoff {Runway}"));
        // markers of other categories are ignored
        assert!(Category::Landing.accepts("{Aircraft} {Runway} {Heading} cleared to land"));
    }

    #[test]
    fn test_filtered_rule_set() {
        let mut rules = RuleSet::default();
        rules.push(Category::Status, "{Aircraft} {Aircraft} requests taxi");
        rules.push(Category::Status, "{Aircraft} status");
        rules.push(Category::FlyHeading, "{Aircraft} fly heading {Heading}");
        rules.push(Category::FlyHeading, "{Aircraft} fly heading");
        rules.push(Category::Invalid, "{Aircraft}");

        let filtered = rules.filtered();
        assert_eq!(filtered.status, ["{Aircraft} status"]);
        assert_eq!(filtered.fly_heading, ["{Aircraft} fly heading {Heading}"]);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_deserialize_wire_names() {
        let rules: RuleSet = serde_json::from_str(
            r#"{
                "AircraftStatRules": ["{Aircraft} status"],
                "AircraftVectorToNormalWaypointRules": ["{Aircraft} direct {WaypointSpelled}"]
            }"#,
        )
        .unwrap();
        assert_eq!(rules.status.len(), 1);
        assert!(rules.takeoff.is_empty());
        assert_eq!(rules.vector_to_spelled_waypoint.len(), 1);
        let categories: Vec<_> = rules.iter().map(|template| template.category).collect();
        assert_eq!(categories, [Category::Status, Category::VectorToSpelledWaypoint]);
    }
}
