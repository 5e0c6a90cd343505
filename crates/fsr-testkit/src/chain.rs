use fsr_calibration::Tank;
use fsr_engine::{
    submit, Authorization, PriorRecords, ReconciliationRecord, SubmissionContext,
    SubmissionError, SubmissionInput,
};
use fsr_schemas::{PriceBook, ThresholdConfig};

/// Successive shifts of one tank, held the way the storage collaborator
/// would hold them: every accepted record is kept, the latest per shift is
/// current.
pub struct ShiftChain {
    tank: Tank,
    thresholds: ThresholdConfig,
    prices: PriceBook,
    records: Vec<ReconciliationRecord>,
}

impl ShiftChain {
    pub fn new(tank: Tank, thresholds: ThresholdConfig, prices: PriceBook) -> Self {
        Self {
            tank,
            thresholds,
            prices,
            records: Vec::new(),
        }
    }

    /// Every accepted record, superseded ones included, in submission order.
    pub fn records(&self) -> &[ReconciliationRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&ReconciliationRecord> {
        self.records.last()
    }

    /// Submit a shift. The latest record of an earlier shift seeds it; an
    /// existing record for the same shift is superseded.
    pub fn submit(&mut self, input: SubmissionInput) -> Result<&ReconciliationRecord, SubmissionError> {
        let key = input.shift_key();
        let previous_period = self.records.iter().rev().find(|r| r.shift < key);
        let superseded = self.records.iter().rev().find(|r| r.shift == key);

        let ctx = SubmissionContext {
            tank: &self.tank,
            thresholds: &self.thresholds,
            prices: &self.prices,
            prior: PriorRecords {
                previous_period,
                superseded,
            },
            authorization: Authorization::Granted,
        };
        let record = submit(input, &ctx)?;
        let idx = self.records.len();
        self.records.push(record);
        Ok(&self.records[idx])
    }
}
