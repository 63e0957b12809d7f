use crate::domain::{Destination, MAX_DESTINATIONS_PER_MESSAGE, Reply, ReplyCode, SendSms};

use super::{HttpSmsClient, HttpSmsError};

impl HttpSmsClient {
    /// Send to any number of destinations, ten per request, in input order.
    ///
    /// - A batch rejected with HTTP 503 yields `-15` for each of its destinations instead
    ///   of an error.
    /// - Destinations answered with `-20` are resent once as a sub-batch and their codes are
    ///   replaced by the resend's codes, whatever those are.
    ///
    /// Every other error stops the send and is returned as-is; batches already sent are not
    /// reported.
    pub async fn send_sms(&self, request: &SendSms) -> Result<Reply, HttpSmsError> {
        let mut codes = Vec::with_capacity(request.destinations().len());
        for batch in request.destinations().chunks(MAX_DESTINATIONS_PER_MESSAGE) {
            let mut batch_codes = self.send_batch(request, batch).await?;
            self.resend_requested(request, batch, &mut batch_codes).await?;
            codes.extend(batch_codes);
        }
        Ok(Reply::new(codes))
    }

    async fn send_batch(
        &self,
        request: &SendSms,
        batch: &[Destination],
    ) -> Result<Vec<ReplyCode>, HttpSmsError> {
        let message = request.message_for(batch.to_vec())?;
        match self.send_message(&message).await {
            Ok(reply) => Ok(reply.codes),
            Err(HttpSmsError::InvalidDestination) => {
                tracing::warn!(
                    destinations = batch.len(),
                    "batch rejected as invalid destination"
                );
                Ok(vec![ReplyCode::invalid_destination(); batch.len()])
            }
            Err(err) => Err(err),
        }
    }

    async fn resend_requested(
        &self,
        request: &SendSms,
        batch: &[Destination],
        codes: &mut [ReplyCode],
    ) -> Result<(), HttpSmsError> {
        let (positions, destinations): (Vec<usize>, Vec<Destination>) = codes
            .iter()
            .zip(batch)
            .enumerate()
            .filter(|(_, (code, _))| code.is_retry_requested())
            .map(|(position, (_, destination))| (position, destination.clone()))
            .unzip();
        if positions.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            destinations = positions.len(),
            "gateway requested resend for part of a batch"
        );
        let message = request.message_for(destinations)?;
        let reply = self.send_message(&message).await?;
        if reply.len() != positions.len() {
            tracing::warn!(
                expected = positions.len(),
                actual = reply.len(),
                "resend reply count does not match"
            );
        }
        for (position, code) in positions.into_iter().zip(reply) {
            codes[position] = code;
        }
        Ok(())
    }
}
