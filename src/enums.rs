string_enum! {
	/// Processing state of an individual or company verification.
	pub struct VerificationState {
		/// Created, nothing submitted yet.
		VOID = "VOID",
		/// Waiting for the subject to start.
		WAITING = "WAITING",
		/// The subject opened the session.
		STARTED = "STARTED",
		/// Documents are being analysed.
		RUNNING = "RUNNING",
		/// Analysis finished.
		PROCESSED = "PROCESSED",
		/// Analysis failed.
		FAILED = "FAILED",
		/// The session was abandoned.
		ABORTED = "ABORTED",
		/// The session link expired.
		EXPIRED = "EXPIRED",
		/// Removed by the workspace.
		DELETED = "DELETED",
	}
}

string_enum! {
	/// Review outcome of a verification.
	pub struct VerificationStatus {
		/// Rejected by a reviewer or rule.
		REJECTED = "rejected",
		/// Waiting for a manual decision.
		NEED_REVIEW = "need_review",
		/// Approved.
		APPROVED = "approved",
	}
}

string_enum! {
	/// Kind of document submitted for analysis.
	pub struct DocumentType {
		/// Passport.
		PASSPORT = "passport",
		/// Identity card, front side.
		IDENTITY_CARD_FRONT = "identity_card_front",
		/// Identity card, back side.
		IDENTITY_CARD_BACK = "identity_card_back",
		/// Any identity document.
		IDENTITY_DOCUMENT = "identity_document",
		/// Driving licence.
		DRIVER_LICENSE = "driver_license",
		/// Residence permit.
		RESIDENCE_PERMIT = "residence_permit",
		/// Proof of address.
		PROOF_OF_ADDRESS = "proof_of_address",
		/// Bank account details.
		RIB = "rib",
		/// Payslip.
		PAYSLIP = "payslip",
		/// Tax notice.
		TAX = "tax",
		/// Invoice.
		INVOICE = "invoice",
		/// Receipt.
		RECEIPT = "receipt",
		/// French company registration extract.
		KBIS = "kbis",
		/// Articles of association.
		COMPANY_STATUTS = "company_statuts",
		/// Certificate of incorporation.
		CERTIFICATE_OF_INCORPORATION = "certificate_of_incorporation",
		/// Certificate of good standing.
		CERTIFICATE_OF_GOOD_STANDING = "certificate_of_good_standing",
		/// Financial statements.
		FINANCIAL_STATEMENTS = "financial_statements",
		/// French tax return bundle.
		LIASSE_FISCALE = "liasse_fiscale",
		/// Beneficial ownership register.
		REGISTER_OF_BENEFICIAL_OWNERS = "register_of_beneficial_owners",
		/// Proof of the source of funds.
		PROOF_OF_SOURCE_FUNDS = "proof_of_source_funds",
		/// Criminal record extract.
		CRIMINAL_RECORD_EXTRACT = "criminal_record_extract",
		/// Vehicle registration certificate.
		VEHICLE_REGISTRATION_CERTIFICATE = "vehicle_registration_certificate",
		/// Birth certificate.
		BIRTH_CERTIFICATE = "birth_certificate",
	}
}

string_enum! {
	/// Category of an anti-money-laundering hit.
	pub struct AmlSuspicionCategory {
		/// Negative press coverage.
		ADVERSE_MEDIA = "Adverse Media",
		/// Disqualified director.
		DISQUALIFIED = "Disqualified",
		/// Listed by a financial regulator.
		FINANCIAL_REGULATOR = "Financial Regulator",
		/// Subject of law enforcement action.
		LAW_ENFORCEMENT = "Law Enforcement",
		/// Insolvency proceedings.
		INSOLVENCY = "Insolvency",
		/// Politically exposed person.
		POLITICALLY_EXPOSED_PERSON = "Politically Exposed Person",
		/// Sanctions list entry.
		SANCTIONS = "Sanctions",
		/// State-owned enterprise.
		STATE_OWNED_ENTERPRISE = "State-Owned Enterprise",
	}
}

string_enum! {
	/// Review outcome of an anti-money-laundering hit.
	pub struct AmlSuspicionStatus {
		/// Confirmed match.
		TRUE_POSITIVE = "true_positive",
		/// Not the same subject.
		FALSE_POSITIVE = "false_positive",
		/// Dismissed without a decision.
		DISCARDED = "discarded",
	}
}

string_enum! {
	/// Gender as printed on identity documents.
	pub struct Gender {
		/// Male.
		MALE = "M",
		/// Female.
		FEMALE = "F",
	}
}

string_enum! {
	/// Whether a company member is a natural or legal person.
	pub struct MemberType {
		/// Natural person.
		PERSON = "person",
		/// Legal person.
		COMPANY = "company",
	}
}

string_enum! {
	/// Where a company member's data came from.
	pub struct MemberSource {
		/// Official registries.
		GOUVE = "gouve",
		/// Entered by the user.
		USER = "user",
		/// Extracted from an uploaded document.
		AI = "ai",
	}
}
