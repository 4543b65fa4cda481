//! Bot template catalog
//!
//! The decision table mapping (SDK version, hosting kind, language) to
//! an ARM template file and a CDN artifact suffix. The table is
//! enumerated so every supported combination is visible in one place;
//! the one invalid combination (v4 function bots) is rejected before
//! lookup.

use crate::errors::DeployerError;

/// Major version of the bot-building SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkVersion {
    V3,
    V4,
}

impl SdkVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdkVersion::V3 => "v3",
            SdkVersion::V4 => "v4",
        }
    }
}

impl std::str::FromStr for SdkVersion {
    type Err = DeployerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v3" => Ok(SdkVersion::V3),
            "v4" => Ok(SdkVersion::V4),
            _ => Err(DeployerError::Validation(format!(
                "Invalid SDK version '{}'. Supported versions are v3 and v4.",
                s
            ))),
        }
    }
}

/// Programming language of the bot code template.
///
/// Unrecognized languages are rejected at parse time. The upstream
/// tooling silently returned a bare CDN root for unknown languages,
/// which produced an unusable artifact URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotLanguage {
    Csharp,
    Javascript,
}

impl std::str::FromStr for BotLanguage {
    type Err = DeployerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csharp" | "c#" => Ok(BotLanguage::Csharp),
            "javascript" | "node" | "node.js" => Ok(BotLanguage::Javascript),
            _ => Err(DeployerError::UnsupportedLanguage(format!(
                "No bot code template exists for language '{}'. Supported languages are Csharp and Javascript.",
                s
            ))),
        }
    }
}

/// Hosting model for the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotKind {
    /// Azure Function app
    Function,
    /// Generic SDK web app ("webapp" normalizes to this)
    Sdk,
}

impl BotKind {
    /// Value passed through to the ARM template's `kind` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Function => "function",
            BotKind::Sdk => "sdk",
        }
    }
}

impl std::str::FromStr for BotKind {
    type Err = DeployerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function" => Ok(BotKind::Function),
            // "webapp" means the generic SDK template
            "webapp" | "sdk" => Ok(BotKind::Sdk),
            _ => Err(DeployerError::Validation(format!(
                "Invalid bot kind '{}'. Supported kinds are function and webapp.",
                s
            ))),
        }
    }
}

/// ARM template family selected for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    FunctionApp,
    V3WebApp,
    V4WebApp,
}

impl TemplateKind {
    /// Name of the on-disk ARM template file
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::FunctionApp => "functionapp.template.json",
            TemplateKind::V3WebApp => "webapp.template.json",
            TemplateKind::V4WebApp => "webappv4.template.json",
        }
    }
}

/// One row of the template decision table
struct CatalogEntry {
    version: SdkVersion,
    kind: BotKind,
    language: BotLanguage,
    template: TemplateKind,
    suffix: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        version: SdkVersion::V3,
        kind: BotKind::Function,
        language: BotLanguage::Csharp,
        template: TemplateKind::FunctionApp,
        suffix: "csharp-abs-functions_emptybot.zip",
    },
    CatalogEntry {
        version: SdkVersion::V3,
        kind: BotKind::Function,
        language: BotLanguage::Javascript,
        template: TemplateKind::FunctionApp,
        suffix: "node.js-abs-functions_emptybot_funcpack.zip",
    },
    CatalogEntry {
        version: SdkVersion::V3,
        kind: BotKind::Sdk,
        language: BotLanguage::Csharp,
        template: TemplateKind::V3WebApp,
        suffix: "csharp-abs-webapp_simpleechobot_precompiled.zip",
    },
    CatalogEntry {
        version: SdkVersion::V3,
        kind: BotKind::Sdk,
        language: BotLanguage::Javascript,
        template: TemplateKind::V3WebApp,
        suffix: "node.js-abs-webapp_hello-chatconnector.zip",
    },
    CatalogEntry {
        version: SdkVersion::V4,
        kind: BotKind::Sdk,
        language: BotLanguage::Csharp,
        template: TemplateKind::V4WebApp,
        suffix: "csharp-abs-webapp-v4_echobot_precompiled.zip",
    },
    CatalogEntry {
        version: SdkVersion::V4,
        kind: BotKind::Sdk,
        language: BotLanguage::Javascript,
        template: TemplateKind::V4WebApp,
        suffix: "node.js-abs-webapp-v4_echobot.zip",
    },
];

/// Select the ARM template and CDN artifact suffix for a bot
/// configuration.
///
/// Fails with `UnsupportedConfiguration` for v4 function bots, which
/// have no template.
pub fn select_template(
    version: SdkVersion,
    language: BotLanguage,
    kind: BotKind,
) -> Result<(TemplateKind, &'static str), DeployerError> {
    if version == SdkVersion::V4 && kind == BotKind::Function {
        return Err(DeployerError::UnsupportedConfiguration(
            "Function bot creation is not supported for v4 bot sdk.".to_string(),
        ));
    }

    CATALOG
        .iter()
        .find(|e| e.version == version && e.kind == kind && e.language == language)
        .map(|e| (e.template, e.suffix))
        .ok_or_else(|| {
            DeployerError::Internal(format!(
                "No template catalog entry for {:?}/{:?}/{:?}",
                version, kind, language
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v3_function_templates() {
        let (template, suffix) =
            select_template(SdkVersion::V3, BotLanguage::Csharp, BotKind::Function).unwrap();
        assert_eq!(template, TemplateKind::FunctionApp);
        assert_eq!(suffix, "csharp-abs-functions_emptybot.zip");

        let (template, suffix) =
            select_template(SdkVersion::V3, BotLanguage::Javascript, BotKind::Function).unwrap();
        assert_eq!(template, TemplateKind::FunctionApp);
        assert_eq!(suffix, "node.js-abs-functions_emptybot_funcpack.zip");
    }

    #[test]
    fn test_v3_webapp_templates() {
        let (template, suffix) =
            select_template(SdkVersion::V3, BotLanguage::Csharp, BotKind::Sdk).unwrap();
        assert_eq!(template, TemplateKind::V3WebApp);
        assert_eq!(suffix, "csharp-abs-webapp_simpleechobot_precompiled.zip");

        let (template, _) =
            select_template(SdkVersion::V3, BotLanguage::Javascript, BotKind::Sdk).unwrap();
        assert_eq!(template, TemplateKind::V3WebApp);
    }

    #[test]
    fn test_v4_webapp_templates() {
        for language in [BotLanguage::Csharp, BotLanguage::Javascript] {
            let (template, _) = select_template(SdkVersion::V4, language, BotKind::Sdk).unwrap();
            assert_eq!(template, TemplateKind::V4WebApp);
        }
    }

    #[test]
    fn test_v4_function_is_unsupported() {
        for language in [BotLanguage::Csharp, BotLanguage::Javascript] {
            let err = select_template(SdkVersion::V4, language, BotKind::Function).unwrap_err();
            assert!(matches!(err, DeployerError::UnsupportedConfiguration(_)));
        }
    }

    #[test]
    fn test_all_supported_combinations_resolve() {
        for version in [SdkVersion::V3, SdkVersion::V4] {
            for language in [BotLanguage::Csharp, BotLanguage::Javascript] {
                for kind in [BotKind::Function, BotKind::Sdk] {
                    if version == SdkVersion::V4 && kind == BotKind::Function {
                        continue;
                    }
                    assert!(select_template(version, language, kind).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_kind_normalization() {
        assert_eq!("webapp".parse::<BotKind>().unwrap(), BotKind::Sdk);
        assert_eq!("sdk".parse::<BotKind>().unwrap(), BotKind::Sdk);
        assert_eq!("function".parse::<BotKind>().unwrap(), BotKind::Function);
        assert!("registration".parse::<BotKind>().is_err());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let err = "Python".parse::<BotLanguage>().unwrap_err();
        assert!(matches!(err, DeployerError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_template_file_names() {
        assert_eq!(TemplateKind::FunctionApp.file_name(), "functionapp.template.json");
        assert_eq!(TemplateKind::V3WebApp.file_name(), "webapp.template.json");
        assert_eq!(TemplateKind::V4WebApp.file_name(), "webappv4.template.json");
    }
}
