pub const OUTCOME_COUNT: usize = 15;

/// One fixed program-outcome category. The table order is significant: it
/// defines output ordering and the tie-break order when scores are equal.
#[derive(Debug)]
pub struct OutcomeCategory {
    pub code: char,
    pub label: &'static str,
    pub description: &'static str,
    pub triggers: &'static [&'static str],
}

pub const CATEGORIES: [OutcomeCategory; OUTCOME_COUNT] = [
    OutcomeCategory {
        code: 'a',
        label: "Applied Computing Knowledge",
        description: "Applies computing and mathematics fundamentals to assigned work",
        triggers: &["algorithm", "computation", "logic", "theory", "apply knowledge"],
    },
    OutcomeCategory {
        code: 'b',
        label: "Problem Analysis",
        description: "Identifies and analyzes problems and requirements",
        triggers: &["analyze", "problem", "requirement", "investigate", "troubleshoot"],
    },
    OutcomeCategory {
        code: 'c',
        label: "Solution Design and Development",
        description: "Designs, implements, and evaluates computing solutions",
        triggers: &["design", "implement", "build", "develop", "create", "prototype"],
    },
    OutcomeCategory {
        code: 'd',
        label: "Modern Tool Usage",
        description: "Applies appropriate techniques and modern tools of the discipline",
        triggers: &["tool", "software", "framework", "platform", "library"],
    },
    OutcomeCategory {
        code: 'e',
        label: "Teamwork and Collaboration",
        description: "Functions effectively as a member of a team",
        triggers: &["team", "collaborate", "cooperate", "group", "coworker"],
    },
    OutcomeCategory {
        code: 'f',
        label: "Communication",
        description: "Communicates effectively with a range of audiences",
        triggers: &["present", "communicate", "explain", "discuss", "meeting"],
    },
    OutcomeCategory {
        code: 'g',
        label: "Professional Ethics",
        description: "Understands professional, ethical, and legal responsibility",
        triggers: &["ethics", "integrity", "honest", "responsible", "confidential"],
    },
    OutcomeCategory {
        code: 'h',
        label: "Lifelong Learning",
        description: "Recognizes the need for continuing professional development",
        triggers: &["learn", "study", "research", "explore", "tutorial"],
    },
    OutcomeCategory {
        code: 'i',
        label: "Project Management",
        description: "Plans and manages tasks against schedules and deadlines",
        triggers: &["plan", "schedule", "deadline", "manage", "organize", "prioritize"],
    },
    OutcomeCategory {
        code: 'j',
        label: "Quality Assurance and Testing",
        description: "Verifies and validates work products",
        triggers: &["test", "debug", "verify", "validate", "quality", "review"],
    },
    OutcomeCategory {
        code: 'k',
        label: "Data Management",
        description: "Designs and maintains data stores and records",
        triggers: &["database", "sql", "query", "record", "backup", "spreadsheet"],
    },
    OutcomeCategory {
        code: 'l',
        label: "Networks and Infrastructure",
        description: "Installs, configures, and maintains systems and networks",
        triggers: &["network", "server", "configure", "install", "maintain", "hardware"],
    },
    OutcomeCategory {
        code: 'm',
        label: "Security Awareness",
        description: "Protects information assets and access",
        triggers: &["security", "password", "encrypt", "protect", "access control"],
    },
    OutcomeCategory {
        code: 'n',
        label: "User Support and Service",
        description: "Supports end users and delivers service",
        triggers: &["support", "assist", "client", "customer", "help desk"],
    },
    OutcomeCategory {
        code: 'o',
        label: "Industry Best Practices",
        description: "Follows industry standards, procedures, and documentation",
        triggers: &["best practice", "standard", "procedure", "documentation", "workflow"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_categories_with_sequential_codes() {
        assert_eq!(CATEGORIES.len(), OUTCOME_COUNT);
        for (i, category) in CATEGORIES.iter().enumerate() {
            assert_eq!(category.code, (b'a' + i as u8) as char);
        }
    }

    #[test]
    fn triggers_are_lowercase_and_nonempty() {
        for category in CATEGORIES.iter() {
            assert!(!category.triggers.is_empty());
            for trigger in category.triggers {
                assert_eq!(*trigger, trigger.to_lowercase());
                assert!(!trigger.trim().is_empty());
            }
        }
    }
}
