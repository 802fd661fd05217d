//! Agent instruction text.

use cargotrack_protocols::DONE_TOOL;

/// Builds the instruction handed to the tracking agent.
#[derive(Debug, Clone)]
pub struct TaskComposer {
    site_url: String,
    carrier: String,
}

impl TaskComposer {
    pub fn new(site_url: impl Into<String>, carrier: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            carrier: carrier.into(),
        }
    }

    /// Instruction for looking up `reference_id`.
    pub fn compose(&self, reference_id: &str) -> String {
        format!(
            r#"Track cargo with reference ID: {reference_id}

1. Navigate to {site_url}
2. Locate the {carrier} option
3. Access the tracking section and enter the reference ID
4. Extract the following details:
   - Vessel name and number
   - Voyage details
   - Port of loading
   - Port of discharge
   - Estimated time of arrival
   - Current status

When finished, call the `{done}` tool with the data in this JSON format:
{{
    "vessel": {{
        "name": "vessel name",
        "number": "voyage number"
    }},
    "ports": {{
        "loading": "port of loading",
        "discharge": "port of discharge"
    }},
    "schedule": {{
        "eta": "estimated arrival time",
        "status": "current status"
    }}
}}
Leave out any field you could not find."#,
            site_url = self.site_url,
            carrier = self.carrier,
            done = DONE_TOOL,
        )
    }
}
