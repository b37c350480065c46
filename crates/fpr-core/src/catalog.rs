//! # Built-in FCA Catalog
//!
//! The seven financial-promotion rules reviewed by default, scoped across
//! five UK regulatory handbooks. The catalog is static data; it is turned
//! into a validated [`RuleRegistry`](crate::RuleRegistry) by
//! [`RuleRegistry::fca_default`](crate::RuleRegistry::fca_default).

/// Financial Services and Markets Act.
pub const FSMA: &str = "FSMA";
/// Consumer Credit sourcebook.
pub const FCA_CONC: &str = "FCA CONC";
/// Principles for Businesses.
pub const FCA_PRIN: &str = "FCA PRIN";
/// Conduct of Business sourcebook.
pub const FCA_COBS: &str = "FCA COBS";
/// FG24/1 finalised guidance on financial promotions on social media.
pub const SOCIAL_MEDIA: &str = "Financial promotions on social media";

/// Handbooks in presentation order.
pub const FCA_HANDBOOKS: [&str; 5] = [FSMA, FCA_CONC, FCA_PRIN, FCA_COBS, SOCIAL_MEDIA];

/// One static catalog entry: `(name, handbooks, text)`.
pub type CatalogEntry = (&'static str, &'static [&'static str], &'static str);

/// The default rule set.
pub const FCA_RULES: [CatalogEntry; 7] = [
    (
        "Authorization and Approval",
        &[FSMA],
        "The video's content must be authorized by an appropriate person within the firm. \
         If the video promotes an investment activity, it needs approval from an \
         FCA-authorized individual. This helps ensure the video's content is compliant and \
         accurate.",
    ),
    (
        "Clear, Fair, and Not Misleading",
        &[FCA_CONC, FCA_PRIN, FCA_COBS, SOCIAL_MEDIA],
        "This overarching principle is repeatedly emphasized across various FCA guidelines. \
         The video's content must be presented clearly, fairly, and in a way that doesn't \
         mislead viewers. This applies to the overall message, the presentation of risks and \
         benefits, and any claims or statements made.",
    ),
    (
        "Risk Warnings",
        &[FCA_CONC, FCA_COBS, SOCIAL_MEDIA],
        "The video must include clear and prominent risk warnings, especially if it features \
         high-cost short-term credit (HCSTC) products or high-risk investments (HRIs). These \
         warnings should be easily visible and understandable, not hidden in captions or \
         supplementary text.",
    ),
    (
        "Consumer Understanding",
        &[FCA_PRIN, SOCIAL_MEDIA],
        "The video should be designed to be easily understood by its target audience. It \
         should avoid using jargon or complex language, particularly when targeting retail \
         clients. The information should be presented in a way that avoids confusion and \
         empowers viewers to make informed decisions.",
    ),
    (
        "Stand-Alone Compliance",
        &[SOCIAL_MEDIA],
        "The video must be compliant on its own, without requiring viewers to seek external \
         information for crucial details. Risk warnings and other essential information \
         should be clearly presented within the video itself.",
    ),
    (
        "Avoidance of High-Pressure Selling",
        &[FCA_CONC],
        "The video should not employ high-pressure tactics or create an undue sense of \
         urgency. Viewers should be given adequate time to consider their options without \
         feeling pressured or manipulated.",
    ),
    (
        "Suitability of Social Media",
        &[SOCIAL_MEDIA],
        "If the video is shared on social media platforms like TikTok or Instagram, consider \
         the platform's suitability for promoting financial products. Platforms with \
         character limitations or specific design features might not be appropriate for \
         complex financial products that require detailed explanations.",
    ),
];
