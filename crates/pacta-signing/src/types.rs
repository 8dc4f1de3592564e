//! Envelope wire types.
//!
//! Field names follow the provider's camelCase REST schema; all offsets and
//! frequencies are strings on the wire.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// One document inside an envelope, carried base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDocument {
    pub document_base64: String,
    pub name: String,
    pub file_extension: String,
    pub document_id: String,
}

/// Anchor-positioned signature field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignHereTab {
    pub anchor_string: String,
    pub anchor_units: String,
    pub anchor_x_offset: String,
    pub anchor_y_offset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tabs {
    pub sign_here_tabs: Vec<SignHereTab>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub email: String,
    pub name: String,
    pub client_user_id: String,
    pub recipient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Tabs>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    pub signers: Vec<Signer>,
}

/// A signing request: documents plus signer metadata, submitted as `sent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    pub email_subject: String,
    pub documents: Vec<EnvelopeDocument>,
    pub recipients: Recipients,
    pub status: String,
}

/// The signer the caller supplies when routing a contract for signature.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerDescriptor {
    pub email: String,
    pub name: String,
    pub client_user_id: String,
}

impl EnvelopeDefinition {
    /// Envelope with one PDF document and one embedded signer whose
    /// signature field anchors on the `/sn1/` marker.
    pub fn for_single_document(
        document: &[u8],
        document_name: &str,
        signer: &SignerDescriptor,
    ) -> Self {
        EnvelopeDefinition {
            email_subject: "Please review and sign this document".to_string(),
            documents: vec![EnvelopeDocument {
                document_base64: BASE64.encode(document),
                name: document_name.to_string(),
                file_extension: "pdf".to_string(),
                document_id: "1".to_string(),
            }],
            recipients: Recipients {
                signers: vec![Signer {
                    email: signer.email.clone(),
                    name: signer.name.clone(),
                    client_user_id: signer.client_user_id.clone(),
                    recipient_id: "1".to_string(),
                    tabs: Some(Tabs {
                        sign_here_tabs: vec![SignHereTab {
                            anchor_string: "/sn1/".to_string(),
                            anchor_units: "pixels".to_string(),
                            anchor_x_offset: "20".to_string(),
                            anchor_y_offset: "10".to_string(),
                        }],
                    }),
                }],
            },
            status: "sent".to_string(),
        }
    }
}

/// Embedded-signing (recipient view) request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientViewRequest {
    pub return_url: String,
    pub authentication_method: String,
    pub email: String,
    pub user_name: String,
    pub client_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_url: Option<String>,
}

impl RecipientViewRequest {
    pub fn for_signer(signer: &SignerDescriptor, return_url: &str) -> Self {
        RecipientViewRequest {
            return_url: return_url.to_string(),
            authentication_method: "none".to_string(),
            email: signer.email.clone(),
            user_name: signer.name.clone(),
            client_user_id: signer.client_user_id.clone(),
            ping_frequency: None,
            ping_url: None,
        }
    }
}

/// Result of the composed submit-and-view flow.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedSigning {
    pub envelope_id: String,
    pub redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> SignerDescriptor {
        SignerDescriptor {
            email: "signer@example.com".to_string(),
            name: "Signer Name".to_string(),
            client_user_id: "1000".to_string(),
        }
    }

    #[test]
    fn test_envelope_serializes_to_camel_case_wire_form() {
        let envelope = EnvelopeDefinition::for_single_document(b"%PDF-", "contract.pdf", &signer());
        let json = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(json["emailSubject"], "Please review and sign this document");
        assert_eq!(json["status"], "sent");
        assert_eq!(json["documents"][0]["fileExtension"], "pdf");
        assert_eq!(json["documents"][0]["documentId"], "1");
        let sign_here = &json["recipients"]["signers"][0]["tabs"]["signHereTabs"][0];
        assert_eq!(sign_here["anchorString"], "/sn1/");
        assert_eq!(sign_here["anchorUnits"], "pixels");
    }

    #[test]
    fn test_envelope_document_is_base64_of_payload() {
        let payload = b"%PDF-1.7 fake";
        let envelope = EnvelopeDefinition::for_single_document(payload, "contract.pdf", &signer());
        let decoded = BASE64
            .decode(&envelope.documents[0].document_base64)
            .expect("valid base64");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_recipient_view_matches_signer() {
        let view = RecipientViewRequest::for_signer(&signer(), "https://app.example.com/done");
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["authenticationMethod"], "none");
        assert_eq!(json["userName"], "Signer Name");
        assert_eq!(json["clientUserId"], "1000");
        assert!(json.get("pingFrequency").is_none());
    }
}
