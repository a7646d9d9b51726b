//! Check-digit verification for Brazilian identity documents.
//!
//! Both functions expect the bare digit string produced by the normalizer.
//! Sequences of a single repeated digit pass the modulo-11 arithmetic but
//! are never issued, so they are rejected.

/// Returns true if `cpf` is 11 digits with valid check digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let Some(digits) = to_digits(cpf, 11) else {
        return false;
    };
    if is_repeated(&digits) {
        return false;
    }

    let check = |len: usize| {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        let remainder = (sum * 10) % 11;
        if remainder == 10 { 0 } else { remainder }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// Returns true if `cnpj` is 14 digits with valid check digits.
pub fn is_valid_cnpj(cnpj: &str) -> bool {
    const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let Some(digits) = to_digits(cnpj, 14) else {
        return false;
    };
    if is_repeated(&digits) {
        return false;
    }

    let check = |weights: &[u32]| {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        if sum % 11 < 2 { 0 } else { 11 - sum % 11 }
    };

    check(&FIRST_WEIGHTS) == digits[12] && check(&SECOND_WEIGHTS) == digits[13]
}

fn to_digits(value: &str, expected_len: usize) -> Option<Vec<u32>> {
    if value.len() != expected_len {
        return None;
    }
    value.chars().map(|c| c.to_digit(10)).collect()
}

fn is_repeated(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("12345678909"));
    }

    #[test]
    fn test_invalid_cpf() {
        assert!(!is_valid_cpf("52998224726"));
        assert!(!is_valid_cpf("12345678900"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn test_valid_cnpj() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("12345678000195"));
    }

    #[test]
    fn test_invalid_cnpj() {
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("1122233300018"));
        assert!(!is_valid_cnpj("11.222.333/0001-81"));
    }
}
