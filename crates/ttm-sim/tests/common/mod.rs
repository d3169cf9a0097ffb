// Shared fixtures; not every test binary uses every helper.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use ttm_sim::{LoadProfile, TemperatureProfile};
use ttm_spec::{
    CoolerType, PerSide, Transformer, UserBaseSpecifications, UserThreeWindingSpecifications,
    UserTransformerSpecifications, WindingSpecifications,
};

pub fn stamps(minutes: &[f64]) -> Vec<NaiveDateTime> {
    let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    minutes
        .iter()
        .map(|m| t0 + Duration::seconds((m * 60.0) as i64))
        .collect()
}

pub fn single_profile(minutes: &[f64], ambient: &[f64], load: &[f64]) -> TemperatureProfile {
    TemperatureProfile::new(
        stamps(minutes),
        ambient.to_vec(),
        LoadProfile::Single(load.to_vec()),
    )
    .unwrap()
}

pub fn small_user() -> UserTransformerSpecifications {
    UserTransformerSpecifications {
        base: UserBaseSpecifications {
            no_load_loss: 200.0,
            amb_temp_surcharge: 20.0,
            hot_spot_fac: Some(1.1),
            ..Default::default()
        },
        load_loss: 1000.0,
        nom_load_sec_side: 1500.0,
    }
}

pub fn winding(nom_load: f64, winding_oil_gradient: f64) -> WindingSpecifications {
    WindingSpecifications {
        nom_load,
        winding_oil_gradient,
    }
}

/// Three-winding ONAF transformer with the default total loss.
pub fn three_winding(
    windings: PerSide<WindingSpecifications>,
    pairwise: [f64; 3],
    no_load_loss: f64,
    amb_temp_surcharge: f64,
) -> Transformer {
    let user = UserThreeWindingSpecifications {
        base: UserBaseSpecifications {
            no_load_loss,
            amb_temp_surcharge,
            ..Default::default()
        },
        lv_winding: windings.lv,
        mv_winding: windings.mv,
        hv_winding: windings.hv,
        load_loss_hv_lv: pairwise[0],
        load_loss_hv_mv: pairwise[1],
        load_loss_mv_lv: pairwise[2],
        load_loss_total: None,
    };
    Transformer::three_winding(&user, CoolerType::Onaf).unwrap()
}

pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < tol, "point {i}: {a} != {e}");
    }
}
