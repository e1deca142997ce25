// src/common/dates.rs

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Interpreta o parâmetro `date` (`YYYY-MM-DD` ou ISO-8601) como um dia
/// completo na zona configurada do deployment e devolve o intervalo
/// inclusivo [início do dia, fim do dia] já convertido para UTC.
///
/// Retorna `None` quando a string não é uma data válida; quem chama
/// decide transformar isso em erro de validação.
pub fn day_range(raw: &str, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let date = parse_filter_date(raw)?;

    let start = tz
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()?;
    // 23:59:59.999999, igual ao limite superior inclusivo do filtro original
    let end = tz
        .from_local_datetime(&date.and_hms_micro_opt(23, 59, 59, 999_999)?)
        .latest()?;

    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

fn parse_filter_date(raw: &str) -> Option<NaiveDate> {
    // Formato curto YYYY-MM-DD
    if raw.len() == 10 && raw.contains('-') {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }

    // ISO-8601 completo, com hora e offset (o "Z" também é aceito)
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn intervalo_do_dia_em_utc() {
        let (start, end) = day_range("2024-03-05", Tz::UTC).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-05T23:59:59.999999+00:00");
    }

    #[test]
    fn intervalo_respeita_zona_configurada() {
        // São Paulo fica em UTC-3: o dia local começa às 03:00 UTC.
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let (start, end) = day_range("2024-03-05", tz).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-03-05T03:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-06T02:59:59.999999+00:00");
    }

    #[test]
    fn aceita_iso_completo_e_usa_somente_a_data() {
        let (start_a, end_a) = day_range("2024-03-05T14:30:00Z", Tz::UTC).unwrap();
        let (start_b, end_b) = day_range("2024-03-05", Tz::UTC).unwrap();
        assert_eq!(start_a, start_b);
        assert_eq!(end_a, end_b);
    }

    #[test]
    fn rejeita_datas_invalidas() {
        assert!(day_range("2024-13-40", Tz::UTC).is_none());
        assert!(day_range("ontem", Tz::UTC).is_none());
        assert!(day_range("", Tz::UTC).is_none());
    }
}
