//! Static theme asset registry: 4 themes × 2 modes × 4 asset kinds, with up
//! to 4 versions per group (127 assets total — Welcome/Dark/SpotIllustration
//! ships 3).
//!
//! Assets live on a CDN; the registry stores the path tail under a shared
//! base URL. Lookups never panic: an out-of-range version index falls back to
//! the first version of the same group.

use serde::{Deserialize, Serialize};

pub const CLOUDINARY_BASE: &str = "https://res.cloudinary.com/sarah-sahl/image/upload/";

/// Returned to callers that insist on a non-empty URL when a group is missing.
pub const FALLBACK_IMAGE_URL: &str = "https://via.placeholder.com/800x600?text=Image+Not+Found";

// ────────────────────────────────────────────────────────────────────────────
// Registry enums
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeName {
    Welcome,
    DeepWater,
    Diamond,
    Steel,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Welcome,
        ThemeName::DeepWater,
        ThemeName::Diamond,
        ThemeName::Steel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Welcome => "Welcome",
            ThemeName::DeepWater => "DeepWater",
            ThemeName::Diamond => "Diamond",
            ThemeName::Steel => "Steel",
        }
    }

    pub fn from_str(value: &str) -> Option<ThemeName> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    pub fn from_str(value: &str) -> Option<ThemeMode> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Hero,
    FeatureCard,
    SpotIllustration,
    BackgroundTexture,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Hero,
        AssetKind::FeatureCard,
        AssetKind::SpotIllustration,
        AssetKind::BackgroundTexture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Hero => "Hero",
            AssetKind::FeatureCard => "FeatureCard",
            AssetKind::SpotIllustration => "SpotIllustration",
            AssetKind::BackgroundTexture => "BackgroundTexture",
        }
    }

    pub fn from_str(value: &str) -> Option<AssetKind> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Asset tables
// ────────────────────────────────────────────────────────────────────────────

/// Path tails (under [`CLOUDINARY_BASE`]) for one theme/mode/kind group,
/// ordered by version.
pub fn version_tails(theme: ThemeName, mode: ThemeMode, kind: AssetKind) -> &'static [&'static str] {
    use AssetKind::*;
    use ThemeMode::*;
    use ThemeName::*;

    match (theme, mode, kind) {
        // Welcome
        (Welcome, Light, Hero) => &[
            "v1761248802/Welcome_Hero_Light_16x9_v01_ocuis3.svg",
            "v1761248802/Welcome_Hero_Light_16x9_v02_phslgb.svg",
            "v1761248803/Welcome_Hero_Light_16x9_v03_u18tmv.svg",
            "v1761248804/Welcome_Hero_Light_16x9_v04_ee8l1y.svg",
        ],
        (Welcome, Light, FeatureCard) => &[
            "v1761248801/Welcome_FeatureCard_Light_4x5_v01_d0rye1.svg",
            "v1761248801/Welcome_FeatureCard_Light_4x5_v02_nak5yd.svg",
            "v1761248801/Welcome_FeatureCard_Light_4x5_v03_xyvpp9.svg",
            "v1761248801/Welcome_FeatureCard_Light_4x5_v04_z8wrbu.svg",
        ],
        (Welcome, Light, SpotIllustration) => &[
            "v1761248804/Welcome_SpotIllustration_Light_1x1_v01_rmkhf3.svg",
            "v1761248805/Welcome_SpotIllustration_Light_1x1_v02_ft0hom.svg",
            "v1761248804/Welcome_SpotIllustration_Light_1x1_v03_eupexi.svg",
            "v1761248804/Welcome_SpotIllustration_Light_1x1_v04_copy_j3hytp.svg",
        ],
        (Welcome, Light, BackgroundTexture) => &[
            "v1761248800/Welcome_BackgroundTexture_9x16_v01_kwxpdz.svg",
            "v1761248801/Welcome_BackgroundTexture_9x16_v02_cc1qi4.svg",
            "v1761248802/Welcome_BackgroundTexture_9x16_v03_nvtnqy.svg",
            "v1761248802/Welcome_BackgroundTexture_9x16_v04_wdijhf.svg",
        ],
        (Welcome, Dark, Hero) => &[
            "v1761248824/Welcome_Hero_Dark_16x9_v01_oolhwv.svg",
            "v1761248824/Welcome_Hero_Dark_16x9_v02_nmviqd.svg",
            "v1761248825/Welcome_Hero_Dark_16x9_v03_qrfbsw.svg",
            "v1761248825/Welcome_Hero_Dark_16x9_v04_glrvxm.svg",
        ],
        (Welcome, Dark, FeatureCard) => &[
            "v1761248822/Welcome_FeatureCard_Dark_4x5_v01_abf3a2.svg",
            "v1761248822/Welcome_FeatureCard_Dark_4x5_v02_uoftef.svg",
            "v1761248823/Welcome_FeatureCard_Dark_4x5_v03_o13zry.svg",
            "v1761248823/Welcome_FeatureCard_Dark_4x5_v04_dltzya.svg",
        ],
        // Only 3 versions exist for this group.
        (Welcome, Dark, SpotIllustration) => &[
            "v1761248826/Welcome_SpotIllustration_Dark_1x1_v01_mcql9o.svg",
            "v1761248826/Welcome_SpotIllustration_Dark_1x1_v02_f9m8pr.svg",
            "v1761248826/Welcome_SpotIllustration_Dark_1x1_v03_ypoz2a.svg",
        ],
        (Welcome, Dark, BackgroundTexture) => &[
            "v1761248823/Welcome_BackgroundTexture_Dark_9x16_v01_fkvf2b.svg",
            "v1761248823/Welcome_BackgroundTexture_Dark_9x16_v02_e5ir1o.svg",
            "v1761248824/Welcome_BackgroundTexture_Dark_9x16_v03_ix8p3o.svg",
            "v1761248824/Welcome_BackgroundTexture_Dark_9x16_v04_bedvxg.svg",
        ],

        // DeepWater
        (DeepWater, Light, Hero) => &[
            "v1761248877/Deep_Water_Hero_Light_16x9_v01_yw3ppd.svg",
            "v1761248877/Deep_Water_Hero_Light_16x9_v02_mginrp.svg",
            "v1761248878/Deep_Water_Hero_Light_16x9_v03_abiqpl.svg",
            "v1761248878/Deep_Water_Hero_Light_16x9_v04_qyjevp.svg",
        ],
        (DeepWater, Light, FeatureCard) => &[
            "v1761248868/Deep_Water_FeatureCard_Light_4x5_v01_sdqjul.svg",
            "v1761248869/Deep_Water_FeatureCard_Light_4x5_v02_tzipsd.svg",
            "v1761248869/Deep_Water_FeatureCard_Light_4x5_v03_mluxz1.svg",
            "v1761248869/Deep_Water_FeatureCard_Light_4x5_v04_aoaz7j.svg",
        ],
        (DeepWater, Light, SpotIllustration) => &[
            "v1761248869/Deep_Water_SpotIllustration_Light_1x1_v01_iljddr.svg",
            "v1761248870/Deep_Water_SpotIllustration_Light_1x1_v02_jbkvxx.svg",
            "v1761248870/Deep_Water_SpotIllustration_Light_1x1_v03_kjmwmm.svg",
            "v1761248871/Deep_Water_SpotIllustration_Light_1x1_v04_tftx1e.svg",
        ],
        (DeepWater, Light, BackgroundTexture) => &[
            "v1761248871/Deep_Water_BackgroundTexture_Light_9x16_v01_ymte64.svg",
            "v1761248871/Deep_Water_BackgroundTexture_Light_9x16_v02_kydvt6.svg",
            "v1761248876/Deep_Water_BackgroundTexture_Light_9x16_v03_mge3uk.svg",
            "v1761248876/Deep_Water_BackgroundTexture_Light_9x16_v04_ujwmyk.svg",
        ],
        (DeepWater, Dark, Hero) => &[
            "v1761248898/Deep_Water_Hero_Dark_16x9_v01_ew1hkt.svg",
            "v1761248899/Deep_Water_Hero_Dark_16x9_v02_gvcilt.svg",
            "v1761248902/Deep_Water_Hero_Dark_16x9_v03_yxsg1n.svg",
            "v1761248902/Deep_Water_Hero_Dark_16x9_v04_nro00f.svg",
        ],
        (DeepWater, Dark, FeatureCard) => &[
            "v1761248890/Deep_Water_FeatureCard_Dark_4x5_v01_yt7oz1.svg",
            "v1761248890/Deep_Water_FeatureCard_Dark_4x5_v02_iuskf6.svg",
            "v1761248891/Deep_Water_FeatureCard_Dark_4x5_v03_igwcgi.svg",
            "v1761248893/Deep_Water_FeatureCard_Dark_4x5_v04_pfd7kh.svg",
        ],
        (DeepWater, Dark, SpotIllustration) => &[
            "v1761248891/Deep_Water_SpotIllustration_Dark_1x1_v01_e22afd.svg",
            "v1761248892/Deep_Water_SpotIllustration_Dark_1x1_v02_hvsjtr.svg",
            "v1761248892/Deep_Water_SpotIllustration_Dark_1x1_v03_aeif4w.svg",
            "v1761248892/Deep_Water_SpotIllustration_Dark_1x1_v04_sbtzuc.svg",
        ],
        (DeepWater, Dark, BackgroundTexture) => &[
            "v1761248894/Deep_Water_BackgroundTexture_Dark_9x16_v01_zgpvcc.svg",
            "v1761248896/Deep_Water_BackgroundTexture_Dark_9x16_v02_zsucrs.svg",
            "v1761248897/Deep_Water_BackgroundTexture_Dark_9x16_v03_ledpxl.svg",
            "v1761248898/Deep_Water_BackgroundTexture_Dark_9x16_v04_apkbr8.svg",
        ],

        // Diamond
        (Diamond, Light, Hero) => &[
            "v1761248937/Diamond_Hero_Light_16x9_v01_gwfptz.svg",
            "v1761248938/Diamond_Hero_Light_16x9_v02_wm1diy.svg",
            "v1761248938/Diamond_Hero_Light_16x9_v03_nvvdpy.svg",
            "v1761248939/Diamond_Hero_Light_16x9_v04_oeq8n6.svg",
        ],
        (Diamond, Light, FeatureCard) => &[
            "v1761248931/Diamond_FeatureCard_Light_4x5_v01_ikmjjl.svg",
            "v1761248931/Diamond_FeatureCard_Light_4x5_v02_tywz8v.svg",
            "v1761248931/Diamond_FeatureCard_Light_4x5_v03_xcjxrp.svg",
            "v1761248932/Diamond_FeatureCard_Light_4x5_v04_l7jnzo.svg",
        ],
        (Diamond, Light, SpotIllustration) => &[
            "v1761248932/Diamond_SpotIllustration_Light_1x1_v01_exqxb8.svg",
            "v1761248933/Diamond_SpotIllustration_Light_1x1_v02_e4s5zc.svg",
            "v1761248933/Diamond_SpotIllustration_Light_1x1_v03_ebqxyj.svg",
            "v1761248933/Diamond_SpotIllustration_Light_1x1_v04_jufclh.svg",
        ],
        (Diamond, Light, BackgroundTexture) => &[
            "v1761248933/Diamond_BackgroundTexture_Light_16x9_v01_jqqhla.svg",
            "v1761248934/Diamond_BackgroundTexture_Light_16x9_v02_aaoocm.svg",
            "v1761248934/Diamond_BackgroundTexture_Light_16x9_v03_kfn2i8.svg",
            "v1761248935/Diamond_BackgroundTexture_Light_16x9_v04_x5fqrj.svg",
        ],
        (Diamond, Dark, Hero) => &[
            "v1761248956/Diamond_Hero_Dark_16x9_v01_xn2cxd.svg",
            "v1761248956/Diamond_Hero_Dark_16x9_v02_jxw5an.svg",
            "v1761248957/Diamond_Hero_Dark_16x9_v03_uemxaw.svg",
            "v1761248958/Diamond_Hero_Dark_16x9_v04_i0fpbb.svg",
        ],
        (Diamond, Dark, FeatureCard) => &[
            "v1761248950/Diamond_FeatureCard_Dark_4x5_v01_lmqvef.svg",
            "v1761248950/Diamond_FeatureCard_Dark_4x5_v02_mebr9j.svg",
            "v1761248951/Diamond_FeatureCard_Dark_4x5_v03_xqilho.svg",
            "v1761248951/Diamond_FeatureCard_Dark_4x5_v04_bqq65t.svg",
        ],
        (Diamond, Dark, SpotIllustration) => &[
            "v1761248951/Diamond_SpotIllustration_Dark_1x1_v01_m5vfeg.svg",
            "v1761248952/Diamond_SpotIllustration_Dark_1x1_v02_k2rcdh.svg",
            "v1761248952/Diamond_SpotIllustration_Dark_1x1_v03_j15hfs.svg",
            "v1761248953/Diamond_SpotIllustration_Dark_1x1_v04_lnhw0r.svg",
        ],
        (Diamond, Dark, BackgroundTexture) => &[
            "v1761248926/Diamond_BackgroundTexture_Dark_16x9_v01_khl7qr.svg",
            "v1761248927/Diamond_BackgroundTexture_Dark_16x9_v02_vz4dbg.svg",
            "v1761248928/Diamond_BackgroundTexture_Dark_16x9_v03_rjhheg.svg",
            "v1761248928/Diamond_BackgroundTexture_Dark_16x9_v04_o0hwuf.svg",
        ],

        // Steel
        (Steel, Light, Hero) => &[
            "v1761248949/Steel_Hero_Light_16x9_v01_kqtamx.svg",
            "v1761248949/Steel_Hero_Light_16x9_v02_iwp8xw.svg",
            "v1761248949/Steel_Hero_Light_16x9_v03_nczb7a.svg",
            "v1761248949/Steel_Hero_Light_16x9_v04_hvubqz.svg",
        ],
        (Steel, Light, FeatureCard) => &[
            "v1761248942/Steel_FeatureCard_Light_4x5_v01_d2djyo.svg",
            "v1761248942/Steel_FeatureCard_Light_4x5_v02_gjqvn2.svg",
            "v1761248943/Steel_FeatureCard_Light_4x5_v03_fxkdaj.svg",
            "v1761248943/Steel_FeatureCard_Light_4x5_v04_cqmcyz.svg",
        ],
        (Steel, Light, SpotIllustration) => &[
            "v1761248944/Steel_SpotIllustration_Light_1x1_v01_lxw7yd.svg",
            "v1761248945/Steel_SpotIllustration_Light_1x1_v02_djmi0u.svg",
            "v1761248946/Steel_SpotIllustration_Light_1x1_v03_pppz8r.svg",
            "v1761248948/Steel_SpotIllustration_Light_1x1_v04_n8zuyz.svg",
        ],
        (Steel, Light, BackgroundTexture) => &[
            "v1761248943/Steel_BackgroundTexture_Light_16x9_v01_d2nvcd.svg",
            "v1761248944/Steel_BackgroundTexture_Light_16x9_v02_fqimw0.svg",
            "v1761248944/Steel_BackgroundTexture_Light_16x9_v03_mfb2rp.svg",
            "v1761248945/Steel_BackgroundTexture_Light_16x9_v04_kcbxhc.svg",
        ],
        (Steel, Dark, Hero) => &[
            "v1761248966/Steel_Hero_Dark_16x9_v01_z8i0qc.svg",
            "v1761248966/Steel_Hero_Dark_16x9_v02_o6k4pz.svg",
            "v1761248967/Steel_Hero_Dark_16x9_v03_fwnivw.svg",
            "v1761248968/Steel_Hero_Dark_16x9_v04_b1dfsz.svg",
        ],
        (Steel, Dark, FeatureCard) => &[
            "v1761248959/Steel_FeatureCard_Dark_4x5_v01_a1klxo.svg",
            "v1761248959/Steel_FeatureCard_Dark_4x5_v02_skqpfs.svg",
            "v1761248960/Steel_FeatureCard_Dark_4x5_v03_hsuomu.svg",
            "v1761248961/Steel_FeatureCard_Dark_4x5_v04_oj1ux1.svg",
        ],
        (Steel, Dark, SpotIllustration) => &[
            "v1761248961/Steel_SpotIllustration_Dark_1x1_v01_xacwms.svg",
            "v1761248962/Steel_SpotIllustration_Dark_1x1_v02_qxkhj8.svg",
            "v1761248962/Steel_SpotIllustration_Dark_1x1_v03_akbf2b.svg",
            "v1761248963/Steel_SpotIllustration_Dark_1x1_v04_m1qj2v.svg",
        ],
        (Steel, Dark, BackgroundTexture) => &[
            "v1761248963/Steel_BackgroundTexture_Dark_16x9_v01_irvj3l.svg",
            "v1761248963/Steel_BackgroundTexture_Dark_16x9_v02_rqc0i6.svg",
            "v1761248964/Steel_BackgroundTexture_Dark_16x9_v03_rwqafy.svg",
            "v1761248965/Steel_BackgroundTexture_Dark_16x9_v04_jfq72b.svg",
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup
// ────────────────────────────────────────────────────────────────────────────

/// The version index a lookup actually resolves to: out-of-range falls back
/// to the first version of the group.
pub fn effective_version(
    theme: ThemeName,
    mode: ThemeMode,
    kind: AssetKind,
    version: usize,
) -> usize {
    let tails = version_tails(theme, mode, kind);
    if version < tails.len() {
        version
    } else {
        0
    }
}

/// Full URL for one asset. Never panics; every group has at least one version.
pub fn asset_url(theme: ThemeName, mode: ThemeMode, kind: AssetKind, version: usize) -> String {
    let tails = version_tails(theme, mode, kind);
    let tail = tails[effective_version(theme, mode, kind, version)];
    format!("{CLOUDINARY_BASE}{tail}")
}

/// Full URLs for every version of a group, in version order.
pub fn all_versions(theme: ThemeName, mode: ThemeMode, kind: AssetKind) -> Vec<String> {
    version_tails(theme, mode, kind)
        .iter()
        .map(|tail| format!("{CLOUDINARY_BASE}{tail}"))
        .collect()
}

/// Whether the exact version index exists (no fallback applied).
pub fn asset_exists(theme: ThemeName, mode: ThemeMode, kind: AssetKind, version: usize) -> bool {
    version < version_tails(theme, mode, kind).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_127_assets() {
        let mut total = 0;
        for theme in ThemeName::ALL {
            for mode in ThemeMode::ALL {
                for kind in AssetKind::ALL {
                    let tails = version_tails(theme, mode, kind);
                    assert!(!tails.is_empty(), "{theme:?}/{mode:?}/{kind:?} is empty");
                    assert!(tails.len() <= 4);
                    total += tails.len();
                }
            }
        }
        assert_eq!(total, 127);
    }

    #[test]
    fn welcome_dark_spot_has_three_versions() {
        let tails = version_tails(
            ThemeName::Welcome,
            ThemeMode::Dark,
            AssetKind::SpotIllustration,
        );
        assert_eq!(tails.len(), 3);
    }

    #[test]
    fn out_of_range_version_falls_back_to_first() {
        let first = asset_url(ThemeName::Welcome, ThemeMode::Light, AssetKind::Hero, 0);
        let fallback = asset_url(ThemeName::Welcome, ThemeMode::Light, AssetKind::Hero, 99);
        assert_eq!(first, fallback);
        assert!(first.starts_with(CLOUDINARY_BASE));
        assert!(first.ends_with(".svg"));
    }

    #[test]
    fn fallback_applies_to_the_short_group() {
        // Index 3 is valid for most groups but not this one.
        assert!(!asset_exists(
            ThemeName::Welcome,
            ThemeMode::Dark,
            AssetKind::SpotIllustration,
            3
        ));
        assert_eq!(
            asset_url(
                ThemeName::Welcome,
                ThemeMode::Dark,
                AssetKind::SpotIllustration,
                3
            ),
            asset_url(
                ThemeName::Welcome,
                ThemeMode::Dark,
                AssetKind::SpotIllustration,
                0
            )
        );
    }

    #[test]
    fn asset_exists_boundaries() {
        assert!(asset_exists(
            ThemeName::Steel,
            ThemeMode::Dark,
            AssetKind::BackgroundTexture,
            3
        ));
        assert!(!asset_exists(
            ThemeName::Steel,
            ThemeMode::Dark,
            AssetKind::BackgroundTexture,
            4
        ));
    }

    #[test]
    fn all_versions_matches_the_table() {
        let urls = all_versions(ThemeName::Diamond, ThemeMode::Light, AssetKind::FeatureCard);
        assert_eq!(urls.len(), 4);
        assert!(urls.iter().all(|u| u.starts_with(CLOUDINARY_BASE)));
    }

    #[test]
    fn name_parsing_is_case_insensitive() {
        assert_eq!(ThemeName::from_str("deepwater"), Some(ThemeName::DeepWater));
        assert_eq!(ThemeName::from_str("Nope"), None);
        assert_eq!(ThemeMode::from_str("dark"), Some(ThemeMode::Dark));
        assert_eq!(AssetKind::from_str("hero"), Some(AssetKind::Hero));
        assert_eq!(AssetKind::from_str("Banner"), None);
    }
}
