// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EvolutionConfig, EvolutionGateway, GatewayError, normalize_address};

fn create_test_config() -> EvolutionConfig {
    EvolutionConfig {
        api_url: String::from("https://evolution.example.com"),
        api_key: String::from("secret"),
        instance_name: String::from("whatsping"),
    }
}

#[test]
fn test_normalize_address_strips_formatting() {
    assert_eq!(normalize_address("+55 (11) 91234-5678"), "5511912345678");
    assert_eq!(normalize_address("5511912345678"), "5511912345678");
}

#[test]
fn test_normalize_address_of_garbage_is_empty() {
    assert_eq!(normalize_address("sem número"), "");
    assert_eq!(normalize_address(""), "");
}

#[test]
fn test_validate_accepts_complete_config() {
    assert!(create_test_config().validate().is_ok());
}

#[test]
fn test_validate_names_first_missing_credential() {
    let mut config: EvolutionConfig = create_test_config();
    config.api_url = String::new();

    let result: Result<(), GatewayError> = config.validate();
    match result {
        Err(GatewayError::MissingCredentials(name)) => {
            assert_eq!(name, "EVOLUTION_API_URL");
        }
        other => panic!("expected missing credentials, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_blank_api_key() {
    let mut config: EvolutionConfig = create_test_config();
    config.api_key = String::from("   ");

    let result: Result<(), GatewayError> = config.validate();
    assert!(matches!(result, Err(GatewayError::MissingCredentials(_))));
}

#[test]
fn test_gateway_new_rejects_incomplete_config() {
    let mut config: EvolutionConfig = create_test_config();
    config.instance_name = String::new();

    let result: Result<EvolutionGateway, GatewayError> = EvolutionGateway::new(config);
    assert!(matches!(result, Err(GatewayError::MissingCredentials(_))));
}

#[test]
fn test_send_url_joins_base_and_instance() {
    let gateway: EvolutionGateway = EvolutionGateway::new(create_test_config()).unwrap();
    assert_eq!(
        gateway.send_url(),
        "https://evolution.example.com/message/sendText/whatsping"
    );
}

#[test]
fn test_send_url_tolerates_trailing_slash() {
    let mut config: EvolutionConfig = create_test_config();
    config.api_url = String::from("https://evolution.example.com/");

    let gateway: EvolutionGateway = EvolutionGateway::new(config).unwrap();
    assert_eq!(
        gateway.send_url(),
        "https://evolution.example.com/message/sendText/whatsping"
    );
}
