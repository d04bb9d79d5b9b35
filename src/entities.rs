//! Connection bindings for every paginated entity
//!
//! Each [`ConnectionKind`] is one loader of the API: an operation name, the
//! entity it pages over, and the quirks that loader has always had (limit
//! policy, whether it reports `totalCount`, whether it takes a date range).

use crate::arguments::LimitPolicy;
use crate::i18n::keys;

/// Paginated entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Affiliation,
    AggregateGuidanceTag,
    Dkim,
    DkimResult,
    Dmarc,
    DmarcSummary,
    Domain,
    GuidanceTag,
    Https,
    Organization,
    Spf,
    Ssl,
    VerifiedDomain,
    VerifiedOrganization,
}

impl Entity {
    /// Cursor namespace
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Affiliation => "affiliations",
            Self::AggregateGuidanceTag => "aggregateGuidanceTags",
            Self::Dkim => "dkim",
            Self::DkimResult => "dkimResult",
            Self::Dmarc => "dmarc",
            Self::DmarcSummary => "dmarcSummaries",
            Self::Domain => "domains",
            Self::GuidanceTag => "guidanceTags",
            Self::Https => "https",
            Self::Organization => "organizations",
            Self::Spf => "spf",
            Self::Ssl => "ssl",
            Self::VerifiedDomain => "verifiedDomains",
            Self::VerifiedOrganization => "verifiedOrganizations",
        }
    }

    /// Name used in user-facing messages
    pub fn connection_name(&self) -> &'static str {
        match self {
            Self::Affiliation => "Affiliation",
            Self::AggregateGuidanceTag => "GuidanceTag",
            Self::Dkim => "DKIM",
            Self::DkimResult => "DKIMResults",
            Self::Dmarc => "DMARC",
            Self::DmarcSummary => "DmarcSummaries",
            Self::Domain => "Domain",
            Self::GuidanceTag => "GuidanceTag",
            Self::Https => "HTTPS",
            Self::Organization => "Organization",
            Self::Spf => "SPF",
            Self::Ssl => "SSL",
            Self::VerifiedDomain => "VerifiedDomain",
            Self::VerifiedOrganization => "VerifiedOrganization",
        }
    }

    /// Noun used in operator log lines
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Affiliation => "affiliations",
            Self::AggregateGuidanceTag | Self::GuidanceTag => "guidance tags",
            Self::Dkim => "dkim scans",
            Self::DkimResult => "dkim results",
            Self::Dmarc => "dmarc scans",
            Self::DmarcSummary => "dmarc summaries",
            Self::Domain | Self::VerifiedDomain => "domains",
            Self::Https => "https scans",
            Self::Organization | Self::VerifiedOrganization => "organizations",
            Self::Spf => "spf scans",
            Self::Ssl => "ssl scans",
        }
    }

    /// Catalog key of the generic load failure message
    pub fn load_failure_key(&self) -> &'static str {
        match self {
            Self::Affiliation => keys::LOAD_AFFILIATIONS,
            Self::AggregateGuidanceTag | Self::GuidanceTag => keys::LOAD_GUIDANCE_TAGS,
            Self::Dkim => keys::LOAD_DKIM,
            Self::DkimResult => keys::LOAD_DKIM_RESULTS,
            Self::Dmarc => keys::LOAD_DMARC,
            Self::DmarcSummary => keys::LOAD_DMARC_SUMMARIES,
            Self::Domain | Self::VerifiedDomain => keys::LOAD_DOMAINS,
            Self::Https => keys::LOAD_HTTPS,
            Self::Organization | Self::VerifiedOrganization => keys::LOAD_ORGANIZATIONS,
            Self::Spf => keys::LOAD_SPF,
            Self::Ssl => keys::LOAD_SSL,
        }
    }
}

/// Every connection loader of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    AffiliationsByOrgId,
    AffiliationsByUserId,
    AggregateGuidanceTags,
    DkimByDomainId,
    DkimGuidanceTags,
    DkimResultsByDkimId,
    DmarcByDomainId,
    DmarcGuidanceTags,
    DmarcSummariesByUserId,
    DomainsByOrgId,
    DomainsByUserId,
    HttpsByDomainId,
    HttpsGuidanceTags,
    OrgsByDomainId,
    OrgsByUserId,
    SpfByDomainId,
    SpfGuidanceTags,
    SslByDomainId,
    SslGuidanceTags,
    VerifiedDomains,
    VerifiedDomainsByOrgId,
    VerifiedOrgs,
    VerifiedOrgsByDomainId,
}

impl ConnectionKind {
    pub const ALL: [ConnectionKind; 23] = [
        Self::AffiliationsByOrgId,
        Self::AffiliationsByUserId,
        Self::AggregateGuidanceTags,
        Self::DkimByDomainId,
        Self::DkimGuidanceTags,
        Self::DkimResultsByDkimId,
        Self::DmarcByDomainId,
        Self::DmarcGuidanceTags,
        Self::DmarcSummariesByUserId,
        Self::DomainsByOrgId,
        Self::DomainsByUserId,
        Self::HttpsByDomainId,
        Self::HttpsGuidanceTags,
        Self::OrgsByDomainId,
        Self::OrgsByUserId,
        Self::SpfByDomainId,
        Self::SpfGuidanceTags,
        Self::SslByDomainId,
        Self::SslGuidanceTags,
        Self::VerifiedDomains,
        Self::VerifiedDomainsByOrgId,
        Self::VerifiedOrgs,
        Self::VerifiedOrgsByDomainId,
    ];

    /// Operation name reported in audit lines
    pub fn operation(&self) -> &'static str {
        match self {
            Self::AffiliationsByOrgId => "loadAffiliationConnectionsByOrgId",
            Self::AffiliationsByUserId => "loadAffiliationConnectionsByUserId",
            Self::AggregateGuidanceTags => "loadAggregateGuidanceTagConnectionsByTagId",
            Self::DkimByDomainId => "loadDkimConnectionsByDomainId",
            Self::DkimGuidanceTags => "loadDkimGuidanceTagConnectionsByTagId",
            Self::DkimResultsByDkimId => "loadDkimResultConnectionsByDkimId",
            Self::DmarcByDomainId => "loadDmarcConnectionsByDomainId",
            Self::DmarcGuidanceTags => "loadDmarcGuidanceTagConnectionsByTagId",
            Self::DmarcSummariesByUserId => "loadDmarcSummaryConnectionsByUserId",
            Self::DomainsByOrgId => "loadDomainConnectionsByOrgId",
            Self::DomainsByUserId => "loadDomainConnectionsByUserId",
            Self::HttpsByDomainId => "loadHttpsConnectionsByDomainId",
            Self::HttpsGuidanceTags => "loadHttpsGuidanceTagConnectionsByTagId",
            Self::OrgsByDomainId => "loadOrgConnectionsByDomainId",
            Self::OrgsByUserId => "loadOrgConnectionsByUserId",
            Self::SpfByDomainId => "loadSpfConnectionsByDomainId",
            Self::SpfGuidanceTags => "loadSpfGuidanceTagConnectionsByTagId",
            Self::SslByDomainId => "loadSslConnectionsByDomainId",
            Self::SslGuidanceTags => "loadSslGuidanceTagConnectionsByTagId",
            Self::VerifiedDomains => "loadVerifiedDomainConnections",
            Self::VerifiedDomainsByOrgId => "loadVerifiedDomainConnectionsByOrgId",
            Self::VerifiedOrgs => "loadVerifiedOrgConnections",
            Self::VerifiedOrgsByDomainId => "loadVerifiedOrgConnectionsByDomainId",
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            Self::AffiliationsByOrgId | Self::AffiliationsByUserId => Entity::Affiliation,
            Self::AggregateGuidanceTags => Entity::AggregateGuidanceTag,
            Self::DkimByDomainId => Entity::Dkim,
            Self::DkimResultsByDkimId => Entity::DkimResult,
            Self::DmarcByDomainId => Entity::Dmarc,
            Self::DmarcSummariesByUserId => Entity::DmarcSummary,
            Self::DomainsByOrgId | Self::DomainsByUserId => Entity::Domain,
            Self::HttpsByDomainId => Entity::Https,
            Self::OrgsByDomainId | Self::OrgsByUserId => Entity::Organization,
            Self::SpfByDomainId => Entity::Spf,
            Self::SslByDomainId => Entity::Ssl,
            Self::VerifiedDomains | Self::VerifiedDomainsByOrgId => Entity::VerifiedDomain,
            Self::VerifiedOrgs | Self::VerifiedOrgsByDomainId => Entity::VerifiedOrganization,
            Self::DkimGuidanceTags
            | Self::DmarcGuidanceTags
            | Self::HttpsGuidanceTags
            | Self::SpfGuidanceTags
            | Self::SslGuidanceTags => Entity::GuidanceTag,
        }
    }

    /// Guidance tag connections page over a fixed tag list and may be read whole
    pub fn policy(&self) -> LimitPolicy {
        if self.is_guidance_tags() {
            LimitPolicy::Optional
        } else {
            LimitPolicy::Required
        }
    }

    pub fn reports_total_count(&self) -> bool {
        !matches!(self, Self::DkimResultsByDkimId)
    }

    /// Scan connections accept `startDate`/`endDate`
    pub fn is_date_filtered(&self) -> bool {
        matches!(
            self,
            Self::DkimByDomainId
                | Self::DmarcByDomainId
                | Self::HttpsByDomainId
                | Self::SpfByDomainId
                | Self::SslByDomainId
        )
    }

    /// Domain and organization listings accept `search`
    pub fn is_searchable(&self) -> bool {
        matches!(
            self,
            Self::DmarcSummariesByUserId
                | Self::DomainsByOrgId
                | Self::DomainsByUserId
                | Self::OrgsByDomainId
                | Self::OrgsByUserId
                | Self::VerifiedDomains
                | Self::VerifiedDomainsByOrgId
                | Self::VerifiedOrgs
                | Self::VerifiedOrgsByDomainId
        )
    }

    fn is_guidance_tags(&self) -> bool {
        matches!(
            self,
            Self::AggregateGuidanceTags
                | Self::DkimGuidanceTags
                | Self::DmarcGuidanceTags
                | Self::HttpsGuidanceTags
                | Self::SpfGuidanceTags
                | Self::SslGuidanceTags
        )
    }
}
