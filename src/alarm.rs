//! Date-threshold rules applied to each row of the claims sheet.
//!
//! Months are counted as 30-day blocks, rounded down.

use chrono::NaiveDate;

pub const DAYS_PER_MONTH: i64 = 30;
/// A claim raises an alarm once this many days have passed since it was filed.
pub const CLAIM_ALARM_DAYS: i64 = 3 * DAYS_PER_MONTH;
/// An accident raises an alarm when fewer than this many days remain before prescription.
pub const PRESCRIPTION_ALARM_DAYS: i64 = DAYS_PER_MONTH;
/// Text of the payment reminder, followed by the amount and the euro sign.
pub const PAYMENT_REMINDER_PREFIX: &str =
    "Temboury Abogados\nTiene pendiente pasar por nuestras oficinas para efectuar el pago de ";

/// One row of the claims sheet, as read by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimRow {
    pub row: u32,
    pub concept: String,
    pub phone: Option<String>,
    pub claim_date: Option<NaiveDate>,
    pub prescription_date: Option<NaiveDate>,
    pub pay_date: Option<NaiveDate>,
    pub company_amount: Option<f64>,
    pub finished: Option<String>,
}

impl ClaimRow {
    /// Only rows with a non-blank "finished" marker other than `SI` are processed.
    pub fn is_open(&self) -> bool {
        self.finished
            .as_deref()
            .map(str::trim)
            .is_some_and(|finished| !finished.is_empty() && !finished.eq_ignore_ascii_case("SI"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alarm {
    ClaimOverdue {
        date: NaiveDate,
        months_elapsed: i64,
    },
    PrescriptionNear {
        date: NaiveDate,
        months_remaining: i64,
    },
    PaymentPending {
        phone: String,
        amount: f64,
    },
}

impl Alarm {
    pub fn mail_subject(&self, row: &ClaimRow) -> Option<String> {
        match self {
            Self::ClaimOverdue { .. } => Some(format!("Alerta de Reclamacion: {}", row.concept)),
            Self::PrescriptionNear { .. } => Some(format!(
                "Alerta de Prescripcion de Siniestro: {}",
                row.concept
            )),
            Self::PaymentPending { .. } => None,
        }
    }

    pub fn mail_body(&self, row: &ClaimRow) -> Option<String> {
        match self {
            Self::ClaimOverdue {
                date,
                months_elapsed,
            } => Some(format!(
                "Han pasado {months_elapsed} meses desde la fecha de reclamacion para: \n\
                 Fila: {}\nConcepto: {}\nFecha de reclamacion: {}",
                row.row,
                row.concept,
                date.format("%d, %b %Y")
            )),
            Self::PrescriptionNear {
                date,
                months_remaining,
            } => Some(format!(
                "Faltan {months_remaining} meses para la fecha de prescripcion del siniestro para: \n\
                 Fila: {}\nConcepto: {}\nFecha de prescripcion de siniestro: {}",
                row.row,
                row.concept,
                date.format("%d, %b %Y")
            )),
            Self::PaymentPending { .. } => None,
        }
    }

    /// Amount owed, formatted for the SMS reminder.
    pub fn amount_text(&self) -> Option<String> {
        match self {
            Self::PaymentPending { amount, .. } => Some(format!("{amount:.2}")),
            _ => None,
        }
    }

    /// SMS reminder for a pending payment, ready to use as a [`SendSms`](crate::SendSms)
    /// body. GSM conversion happens when the message is sent.
    pub fn sms_body(&self) -> Option<String> {
        self.amount_text()
            .map(|amount| format!("{PAYMENT_REMINDER_PREFIX}{amount}€"))
    }
}

/// Whole months elapsed since `date`, if more than `threshold_days` have passed.
pub fn months_elapsed(today: NaiveDate, date: NaiveDate, threshold_days: i64) -> Option<i64> {
    let days = (today - date).num_days();
    (days > threshold_days).then(|| days.div_euclid(DAYS_PER_MONTH))
}

/// Whole months remaining until `date`, if fewer than `threshold_days` remain.
///
/// Dates already in the past also qualify and report a negative count.
pub fn months_remaining(today: NaiveDate, date: NaiveDate, threshold_days: i64) -> Option<i64> {
    let days = (date - today).num_days();
    (days < threshold_days).then(|| days.div_euclid(DAYS_PER_MONTH))
}

/// Alarms raised by `row` on `today`, in claim, prescription, payment order.
pub fn evaluate(row: &ClaimRow, today: NaiveDate) -> Vec<Alarm> {
    if !row.is_open() {
        return Vec::new();
    }

    let mut alarms = Vec::new();
    if let Some(date) = row.claim_date {
        if let Some(months_elapsed) = months_elapsed(today, date, CLAIM_ALARM_DAYS) {
            alarms.push(Alarm::ClaimOverdue {
                date,
                months_elapsed,
            });
        }
    }
    if let Some(date) = row.prescription_date {
        if let Some(months_remaining) = months_remaining(today, date, PRESCRIPTION_ALARM_DAYS) {
            alarms.push(Alarm::PrescriptionNear {
                date,
                months_remaining,
            });
        }
    }
    if row.pay_date.is_none() {
        if let (Some(amount), Some(phone)) = (row.company_amount, row.phone.as_ref()) {
            if amount > 0.0 {
                alarms.push(Alarm::PaymentPending {
                    phone: phone.clone(),
                    amount,
                });
            }
        }
    }
    alarms
}
