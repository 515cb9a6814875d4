//! The club's domain/subdomain taxonomy.
//!
//! A member picks one top-level domain; a subdomain is required only when
//! the chosen domain actually has subdomains to offer.

/// One selectable top-level domain and its subdomains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainOption {
    pub name: &'static str,
    pub subdomains: &'static [&'static str],
}

const DOMAIN_OPTIONS: &[DomainOption] = &[
    DomainOption {
        name: "Tech",
        subdomains: &[
            "Web Development",
            "App Development",
            "Cybersecurity",
            "Competitive Coding",
        ],
    },
    DomainOption {
        name: "Design",
        subdomains: &["UI/UX / Graphic Design", "Video Editing/Motion Graphics"],
    },
    DomainOption {
        name: "Management",
        subdomains: &[],
    },
];

/// All selectable domains, in display order.
pub fn domain_options() -> &'static [DomainOption] {
    DOMAIN_OPTIONS
}

/// Looks up a domain by name.
pub fn find_domain(name: &str) -> Option<&'static DomainOption> {
    DOMAIN_OPTIONS.iter().find(|d| d.name == name)
}

impl DomainOption {
    /// A subdomain must be chosen when this domain offers any.
    pub fn requires_subdomain(&self) -> bool {
        !self.subdomains.is_empty()
    }

    /// Whether `subdomain` belongs to this domain.
    pub fn has_subdomain(&self, subdomain: &str) -> bool {
        self.subdomains.contains(&subdomain)
    }
}
