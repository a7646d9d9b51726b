//! Validation of whole filings against the bundled AUDESP schema.
//!
//! These tests pin the properties every validation pass must keep:
//! - The validator is total: no input tree makes it panic
//! - `is_valid` is exactly "no error findings"
//! - An empty filing scores 0% with one error per required field
//! - A compliant filing scores 100% with no errors

use audesp_core::{DocValue, FilingSchema, Severity, ValidationContext, ValidationResult};
use audesp_normalizer::normalize;
use audesp_parser::audesp_schema;
use audesp_validator::{FilingValidator, StepClock, validate};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn schema() -> FilingSchema {
    audesp_schema().expect("bundled schema parses")
}

fn compliant_filing() -> Value {
    json!({
        "descritor": {
            "tipo_documento": "Prestação de Contas de Convênio",
            "municipio": 3550,
            "entidade": 1234,
            "ano": 2024,
            "mes": 6
        },
        "contratos": [{
            "numero": "001/2024",
            "objeto": "Prestação de serviços de saúde",
            "data_assinatura": "2024-01-10",
            "data_vigencia_inicio": "2024-01-15",
            "data_vigencia_fim": "2024-12-31",
            "valor_total": 120000.0
        }],
        "documentos_fiscais": [{
            "tipo": "Nota Fiscal",
            "numero": "4567",
            "data_emissao": "2024-06-05",
            "fornecedor_cnpj": "11222333000181",
            "valor_bruto": 2500.0
        }],
        "pagamentos": [{
            "numero_documento": "4567",
            "data_pagamento": "2024-06-10",
            "valor_pago": 2500.0,
            "forma_pagamento": "Pix"
        }],
        "empregados": [{
            "cpf": "52998224725",
            "data_admissao": "2023-02-01",
            "salario_contratual": 3500.0
        }]
    })
}

fn raw_filing() -> Value {
    json!({
        "descritor": {
            "tipo_documento": "Prestação de Contas de Convênio",
            "municipio": 3550,
            "entidade": 1234,
            "ano": 2024,
            "mes": 6
        },
        "contratos": [{
            "numero": "001/2024",
            "objeto": "Prestação de serviços de saúde",
            "data_assinatura": "10/1/2024",
            "data_vigencia_inicio": "15/01/2024",
            "data_vigencia_fim": "31/12/2024",
            "valor_total": "R$ 120.000,00"
        }],
        "documentos_fiscais": [{
            "tipo": "Nota Fiscal",
            "numero": "4567",
            "data_emissao": "Emitida em 5/6/2024",
            "fornecedor_cnpj": "11.222.333/0001-81",
            "valor_bruto": "2.500,00"
        }],
        "pagamentos": [{
            "numero_documento": "4567",
            "data_pagamento": "10/06/2024",
            "valor_pago": "R$ 2.500,00",
            "forma_pagamento": "Pix"
        }],
        "empregados": [{
            "cpf": "529.982.247-25",
            "data_admissao": "1/2/2023",
            "salario_contratual": 3500.0
        }]
    })
}

fn assert_well_formed(result: &ValidationResult) {
    assert_eq!(result.is_valid, result.errors.is_empty());
    assert!(result.errors.iter().all(|e| e.severity == Severity::Error));
    assert!(result.warnings.iter().all(|w| w.severity == Severity::Warning));
    assert!((0.0..=100.0).contains(&result.completion_percentage));
    assert!(result.duration >= 0.0);
}

#[test]
fn test_compliant_filing() {
    let result = validate(&DocValue::from(compliant_filing()), Some(&schema()));

    assert_well_formed(&result);
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.completion_percentage, 100.0);
}

#[test]
fn test_empty_filing() {
    let schema = schema();
    let result = validate(&DocValue::empty_object(), Some(&schema));

    assert_well_formed(&result);
    assert!(!result.is_valid);
    assert_eq!(schema.required_field_count(), 22);
    assert_eq!(result.errors.len(), schema.required_field_count());
    assert!(result.errors.iter().any(|e| e.path == "contratos[].valor_total"));
    assert!(!result.errors.iter().any(|e| e.path.starts_with("empregados")));
    assert_eq!(result.completion_percentage, 0.0);
    assert!(
        result
            .errors
            .iter()
            .all(|e| e.message.starts_with("Campo obrigatório vazio"))
    );
    assert_eq!(
        result.suggestions,
        vec![
            "Existem 22 campos obrigatórios vazios. Priorize o preenchimento deles.".to_string(),
            "Considere importar dados de um PDF ou arquivo estruturado para acelerar o preenchimento."
                .to_string(),
        ]
    );
}

#[test]
fn test_raw_filing_needs_normalization() {
    let schema = schema();
    let raw = DocValue::from(raw_filing());

    let before = validate(&raw, Some(&schema));
    assert!(!before.is_valid);

    let after = validate(&normalize(&raw), Some(&schema));
    assert!(after.is_valid, "unexpected errors: {:?}", after.errors);
    assert!(after.warnings.is_empty(), "unexpected warnings: {:?}", after.warnings);
    assert_eq!(after.completion_percentage, 100.0);
    assert_eq!(normalize(&raw), DocValue::from(compliant_filing()));
}

#[test]
fn test_validator_is_total() {
    let schema = schema();
    let mut validator = FilingValidator::new();

    let trees = [
        json!(null),
        json!(true),
        json!(-1.5),
        json!("prestacao"),
        json!([{"descritor": {}}]),
        json!({"descritor": []}),
        json!({"descritor": {"ano": "2024", "mes": 13.5, "municipio": -1, "entidade": {}}}),
        json!({"contratos": {"numero": 1}}),
        json!({"contratos": [null, 1, "x", [], {"valor_total": "muito"}]}),
        json!({"pagamentos": [{"valor_pago": 1e308, "data_pagamento": "2024-02-30"}]}),
        json!({"empregados": [{"cpf": 52998224725_i64, "data_admissao": ""}]}),
        json!({"resumo_executivo": {"saldo": 0, "observacoes": ["a"]}}),
        json!({"descritor": {"ano": i32::MIN}}),
        json!({"descritor": {"ano": i32::MAX}}),
        json!({"descritor": {"ano": i64::MAX}}),
    ];

    for tree in trees {
        let tree = DocValue::from(tree);
        for strict in [false, true] {
            let context = ValidationContext::new().with_strict(strict);
            let result = validator.validate_with_context(&tree, Some(&schema), &context);
            assert_well_formed(&result);
        }
    }
}

#[test]
fn test_extreme_reference_years() {
    let schema = schema();
    let tree = DocValue::from(compliant_filing());
    let mut validator = FilingValidator::new();

    for year in [i32::MIN, i32::MAX] {
        let context = ValidationContext::new().with_reference_year(year);
        let result = validator.validate_with_context(&tree, Some(&schema), &context);
        assert_well_formed(&result);
        assert!(result.is_valid);
        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.message.starts_with("Data fora do exercício"))
        );
    }
}

#[test]
fn test_strict_mode_blocks_soft_findings() {
    let mut filing = compliant_filing();
    filing["empregados"][0]["cpf"] = json!("12345678900");
    filing["resumo_executivo"] = json!({"saldo": 0.0});

    let tree = DocValue::from(filing);
    let schema = schema();
    let mut validator = FilingValidator::new();

    let lenient = validator.validate(&tree, Some(&schema));
    assert!(lenient.is_valid);
    let warned: Vec<&str> = lenient.warnings.iter().map(|w| w.path.as_str()).collect();
    assert_eq!(warned, vec!["empregados[0].cpf", "resumo_executivo.saldo"]);

    let strict = validator.validate_with_context(
        &tree,
        Some(&schema),
        &ValidationContext::new().with_strict(true),
    );
    assert!(!strict.is_valid);
    assert_eq!(strict.errors.len(), 2);
}

#[test]
fn test_section_summary() {
    let mut filing = compliant_filing();
    filing["descritor"]["mes"] = json!(0);
    filing["pagamentos"][0]["forma_pagamento"] = json!("Cartão");

    let result = validate(&DocValue::from(filing), Some(&schema()));
    let sections = result.section_summary();

    assert!(!sections["descritor"].valid);
    assert_eq!(sections["descritor"].error_count, 1);
    assert!(sections["pagamentos"].valid);
    assert_eq!(sections["pagamentos"].warning_count, 1);
    assert!(!sections.contains_key("contratos"));
}

#[test]
fn test_reported_duration() {
    let mut validator = FilingValidator::with_clock(StepClock::new(0.75));
    let result = validator.validate(&DocValue::from(compliant_filing()), Some(&schema()));
    assert_eq!(result.duration, 0.75);
}
