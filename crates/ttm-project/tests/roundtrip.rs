use chrono::{Duration, NaiveDate, NaiveDateTime};
use ttm_controls::FanThresholds;
use ttm_project::schema::*;
use ttm_project::{load_json, load_yaml, save_json, save_yaml, validate_scenario};
use ttm_sim::InitialCondition;
use ttm_spec::{
    CoolerType, SingleWindingOverrides, SpecOverrides, UserBaseSpecifications,
    UserThreeWindingSpecifications, UserTransformerSpecifications, WindingSpecifications,
};

fn stamps(n: usize) -> Vec<NaiveDateTime> {
    let t0 = NaiveDate::from_ymd_opt(2023, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n).map(|i| t0 + Duration::minutes(15 * i as i64)).collect()
}

fn power_scenario() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: "Power ONAF with fans".to_string(),
        transformer: TransformerDef::Power {
            cooling: CoolerType::Onaf,
            specs: UserTransformerSpecifications {
                base: UserBaseSpecifications {
                    no_load_loss: 12_590.0,
                    amb_temp_surcharge: 5.0,
                    top_oil_temp_rise: Some(51.3),
                    ..Default::default()
                },
                load_loss: 157_200.0,
                nom_load_sec_side: 1575.0,
            },
        },
        profile: ProfileDef {
            timestamps: stamps(4),
            ambient: vec![18.0, 19.0, 20.0, 21.0],
            load: Some(vec![1000.0, 1500.0, 1575.0, 900.0]),
            top_oil_measured: Some(vec![40.0, 48.0, 55.0, 50.0]),
            ..Default::default()
        },
        initial_condition: Some(InitialCondition::TopOil { value: 40.0 }),
        cooling_switch: Some(CoolingSwitchDef {
            temperature_threshold: Some(FanThresholds::new(52.0, 45.0).unwrap()),
            natural: Some(SpecOverrides::SingleWinding(SingleWindingOverrides {
                nom_load_sec_side: Some(1050.0),
                top_oil_temp_rise: Some(52.3),
                ..Default::default()
            })),
            ..Default::default()
        }),
    }
}

fn three_winding_scenario() -> Scenario {
    let winding = |nom_load, winding_oil_gradient| WindingSpecifications {
        nom_load,
        winding_oil_gradient,
    };
    Scenario {
        version: LATEST_VERSION,
        name: "Three-winding".to_string(),
        transformer: TransformerDef::ThreeWinding {
            cooling: CoolerType::Onan,
            specs: UserThreeWindingSpecifications {
                base: UserBaseSpecifications {
                    no_load_loss: 34_000.0,
                    amb_temp_surcharge: 0.0,
                    ..Default::default()
                },
                lv_winding: winding(1300.0, 15.0),
                mv_winding: winding(1045.0, 15.5),
                hv_winding: winding(366.0, 15.0),
                load_loss_hv_lv: 95_000.0,
                load_loss_hv_mv: 245_000.0,
                load_loss_mv_lv: 95_000.0,
                load_loss_total: None,
            },
        },
        profile: ProfileDef {
            timestamps: stamps(3),
            ambient: vec![10.0; 3],
            load_lv: Some(vec![500.0; 3]),
            load_mv: Some(vec![400.0; 3]),
            load_hv: Some(vec![150.0; 3]),
            ..Default::default()
        },
        initial_condition: None,
        cooling_switch: None,
    }
}

#[test]
fn roundtrip_yaml_power_scenario() {
    let scenario = power_scenario();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("ttm_project_roundtrip_power.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_three_winding_scenario() {
    let scenario = three_winding_scenario();

    let path = std::env::temp_dir().join("ttm_project_roundtrip_three.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn timestamps_serialize_without_zone() {
    let yaml = serde_yaml::to_string(&power_scenario()).unwrap();
    assert!(yaml.contains("2023-03-01T00:15:00"));
    assert!(yaml.contains("type: power"));
}

#[test]
fn invalid_scenario_is_not_saved() {
    let mut scenario = power_scenario();
    scenario.profile.ambient.pop();
    let path = std::env::temp_dir().join("ttm_project_roundtrip_invalid.yaml");
    assert!(save_yaml(&path, &scenario).is_err());
}
