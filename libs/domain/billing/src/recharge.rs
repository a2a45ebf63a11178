// [libs/domain/billing/src/recharge.rs]
/*!
 * =================================================================
 * APARATO: AUTO-RECHARGE SCHEDULER (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RECARGAS RECURRENTES CON CÁLCULO DE CALENDARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CLAMPED CALENDAR: El día del mes se recorta al último día de los
 *    meses cortos; día 31 dispara Ene 31 -> Feb 28/29 -> Mar 31 sin
 *    producir jamás una fecha inválida.
 * 2. SINGLE CATCH-UP: Tras una ventana de apagado, cada equipo recibe a
 *    lo sumo un disparo de alcance por pasada; el siguiente se calcula
 *    desde el instante del disparo.
 * 3. FUTURE GUARANTEE: next-fire queda estrictamente en el futuro tras
 *    cada disparo exitoso.
 * =================================================================
 */

use crate::engine::CycleOutcome;
use crate::errors::BillingError;
use bison_domain_models::{AutoRechargePlan, RechargeCadence};
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{names, BlobVault};
use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, TimeZone, Utc};
use tracing::{error, info, instrument, warn};

// --- CÁLCULO DE CALENDARIO (núcleo puro, auditable en pruebas) ---

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .expect("calendar invariant")
        .day()
}

/**
 * Próxima ocurrencia semanal estrictamente posterior a 'after'.
 *
 * # Logic:
 * ((día_objetivo − día_actual + 7) mod 7) días desde 'after'; cero
 * degrada a 7 para garantizar el avance.
 */
pub fn next_weekly_occurrence(after: NaiveDate, target_weekday: u32) -> NaiveDate {
    let current_weekday = after.weekday().num_days_from_sunday();
    let mut days_ahead = (target_weekday + 7 - current_weekday) % 7;
    if days_ahead == 0 {
        days_ahead = 7;
    }
    after + Duration::days(i64::from(days_ahead))
}

/**
 * Próxima ocurrencia mensual estrictamente posterior a 'after'.
 *
 * # Logic:
 * El día se recorta al último día del mes evaluado. Si la ocurrencia
 * del mes de 'after' ya pasó (o es hoy), avanza al mes siguiente.
 */
pub fn next_monthly_occurrence(after: NaiveDate, day_of_month: u32) -> NaiveDate {
    let clamped_day = day_of_month.min(days_in_month(after.year(), after.month()));
    let candidate = NaiveDate::from_ymd_opt(after.year(), after.month(), clamped_day)
        .expect("calendar invariant");
    if candidate > after {
        return candidate;
    }

    let (next_year, next_month) = if after.month() == 12 {
        (after.year() + 1, 1)
    } else {
        (after.year(), after.month() + 1)
    };
    let clamped_next = day_of_month.min(days_in_month(next_year, next_month));
    NaiveDate::from_ymd_opt(next_year, next_month, clamped_next).expect("calendar invariant")
}

/// Medianoche local de la fecha, expresada en UTC.
fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive_midnight = date.and_hms_opt(0, 0, 0).expect("calendar invariant");
    match Local.from_local_datetime(&naive_midnight) {
        LocalResult::Single(instant) => instant.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive_midnight),
    }
}

/// Próximo instante de disparo para un plan, anclado al día local de 'now'.
pub fn compute_next_fire(
    now: DateTime<Utc>,
    cadence: RechargeCadence,
    day: u32,
) -> DateTime<Utc> {
    let today_local = now.with_timezone(&Local).date_naive();
    let next_date = match cadence {
        RechargeCadence::Weekly => next_weekly_occurrence(today_local, day),
        RechargeCadence::Monthly => next_monthly_occurrence(today_local, day),
    };
    local_midnight_utc(next_date)
}

// --- SERVICIO ---

pub struct AutoRechargeScheduler {
    vault: BlobVault,
    wallet_service: WalletService,
}

impl AutoRechargeScheduler {
    pub fn new(vault: BlobVault, wallet_service: WalletService) -> Self {
        Self { vault, wallet_service }
    }

    /// Plan vigente del equipo, si existe.
    pub async fn get_plan(&self, team_name: &str) -> Result<Option<AutoRechargePlan>, BillingError> {
        Ok(self
            .vault
            .read_document::<AutoRechargePlan>(names::AUTO_RECHARGE, team_name)
            .await?)
    }

    /**
     * Sella el plan del equipo recalculando el próximo disparo.
     *
     * # Errors:
     * - 'InvalidPlan' si el plan habilitado declara monto no positivo o
     *   día fuera de la cadencia.
     */
    #[instrument(skip(self, plan))]
    pub async fn set_plan(
        &self,
        team_name: &str,
        mut plan: AutoRechargePlan,
    ) -> Result<AutoRechargePlan, BillingError> {
        if plan.enabled && plan.amount <= 0.0 {
            return Err(BillingError::InvalidPlan(format!(
                "amount must be positive, got {}",
                plan.amount
            )));
        }
        if !plan.day_in_range() {
            return Err(BillingError::InvalidPlan(format!(
                "day {} out of range for cadence",
                plan.day
            )));
        }

        // El último disparo es historia del sistema; sobrevive a la edición.
        let existing_plan = self.get_plan(team_name).await?;
        plan.last_fire = existing_plan.and_then(|previous| previous.last_fire);
        plan.next_fire = Some(compute_next_fire(Utc::now(), plan.cadence, plan.day));

        self.vault
            .write_document(names::AUTO_RECHARGE, team_name, &plan)
            .await?;
        info!(
            "🔁 [AUTO_RECHARGE]: Plan sealed for [{}]; next fire {:?}.",
            team_name, plan.next_fire
        );
        Ok(plan)
    }

    /// Pasada anclada al instante presente.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, BillingError> {
        self.run_cycle_at(Utc::now()).await
    }

    /**
     * Dispara los planes habilitados cuyo next-fire ya venció.
     *
     * # Logic:
     * A lo sumo un disparo por equipo por pasada; el siguiente instante
     * se recalcula desde 'now', colapsando los atrasos acumulados en un
     * único abono de alcance.
     */
    #[instrument(skip(self))]
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> Result<CycleOutcome, BillingError> {
        let Some(schedule_blob) = self.vault.get(names::AUTO_RECHARGE).await? else {
            return Ok(CycleOutcome::Completed);
        };

        for (team_name, raw_plan) in &schedule_blob.data {
            let mut plan = match serde_json::from_str::<AutoRechargePlan>(raw_plan) {
                Ok(plan) => plan,
                Err(decoding_fault) => {
                    warn!(
                        "🔁 [AUTO_RECHARGE]: Unreadable plan for [{}]: {}",
                        team_name, decoding_fault
                    );
                    continue;
                }
            };

            let due = plan.enabled
                && plan.next_fire.map_or(false, |next_fire| next_fire <= now);
            if !due {
                continue;
            }

            let credit_verdict = self
                .wallet_service
                .auto_credit(team_name, plan.amount, "scheduled auto-recharge")
                .await;

            if let Err(credit_fault) = credit_verdict {
                error!(
                    "🔁 [AUTO_RECHARGE]: Credit failed for [{}], continuing: {}",
                    team_name, credit_fault
                );
                continue;
            }

            plan.last_fire = Some(now);
            plan.next_fire = Some(compute_next_fire(now, plan.cadence, plan.day));
            self.vault
                .write_document(names::AUTO_RECHARGE, team_name, &plan)
                .await?;

            info!(
                "🔁 [AUTO_RECHARGE]: Fired {:.2} for [{}]; next {:?}.",
                plan.amount, team_name, plan.next_fire
            );
        }

        Ok(CycleOutcome::Completed)
    }
}
