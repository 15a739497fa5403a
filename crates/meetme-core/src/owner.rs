//! Owner ("proprietari") questionnaire.
//!
//! Eight sections, each worth one eighth of the progress bar. The owner rates
//! six management topics twice (how painful today, how valuable to
//! automate), then ranks exactly three of them. The first two ranked topics
//! open a deep-dive block asking for at most two wanted features; the third
//! ranked topic does not. A services question opens a service-type
//! shortlist when the answer is `yes` or `maybe`.

use crate::schema::{
    Cardinality, FieldKind, FieldSpec, OptionSpec, Persona, SectionSpec, SurveySchema, TextFormat,
    Visibility,
};

/// How many leading `top3` entries get a deep-dive block.
pub const DEEP_DIVE_RANK: usize = 2;

/// Answers to `services_interest` that open the service types question.
pub const SERVICES_TRIGGER: &[&str] = &["yes", "maybe"];

/// The six management topics rated, ranked and deep-dived.
pub const TOPICS: &[OptionSpec] = &[
    OptionSpec::new("payments", "Incasso affitti e pagamenti"),
    OptionSpec::new("maintenance", "Manutenzioni e guasti"),
    OptionSpec::new("tenant_search", "Ricerca e selezione inquilini"),
    OptionSpec::new("contracts", "Contratti e scadenze"),
    OptionSpec::new("expenses", "Spese e contabilità"),
    OptionSpec::new("communication", "Comunicazione con gli inquilini"),
];

const PROPERTIES_COUNT: &[OptionSpec] = &[
    OptionSpec::new("one", "1 immobile"),
    OptionSpec::new("two_three", "2-3 immobili"),
    OptionSpec::new("four_ten", "4-10 immobili"),
    OptionSpec::new("over_ten", "Più di 10 immobili"),
];

const RENTAL_TYPE: &[OptionSpec] = &[
    OptionSpec::new("students", "Stanze a studenti"),
    OptionSpec::new("long_term", "Affitti lunghi (4+4, 3+2)"),
    OptionSpec::new("short_term", "Affitti brevi"),
    OptionSpec::new("mixed", "Misto"),
];

const MANAGEMENT_TODAY: &[OptionSpec] = &[
    OptionSpec::new("myself", "Faccio tutto da solo"),
    OptionSpec::new("agency", "Mi appoggio a un'agenzia"),
    OptionSpec::new("property_manager", "Ho un property manager"),
    OptionSpec::new("mixed", "Un mix delle precedenti"),
];

const TIME_SPENT: &[OptionSpec] = &[
    OptionSpec::new("under_2h", "Meno di 2 ore a settimana"),
    OptionSpec::new("2_5h", "2-5 ore a settimana"),
    OptionSpec::new("5_10h", "5-10 ore a settimana"),
    OptionSpec::new("over_10h", "Più di 10 ore a settimana"),
];

const PAYMENTS_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("auto_reminders", "Promemoria automatici di pagamento"),
    OptionSpec::new("online_collection", "Incasso online con riconciliazione"),
    OptionSpec::new("late_tracking", "Tracciamento ritardi e solleciti"),
];

const MAINTENANCE_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("ticketing", "Segnalazioni guasti con foto"),
    OptionSpec::new("vendor_booking", "Prenotazione fornitori verificati"),
    OptionSpec::new("history", "Storico interventi per immobile"),
];

const TENANT_SEARCH_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("compatibility_matching", "Matching per compatibilità tra coinquilini"),
    OptionSpec::new("screening", "Verifica referenze e documenti"),
    OptionSpec::new("visit_scheduling", "Calendario visite automatico"),
];

const CONTRACTS_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("templates", "Modelli di contratto pronti"),
    OptionSpec::new("deadline_alerts", "Avvisi su scadenze e rinnovi"),
    OptionSpec::new("e_signature", "Firma digitale"),
];

const EXPENSES_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("expense_split", "Ripartizione spese tra inquilini"),
    OptionSpec::new("tax_reports", "Report per la dichiarazione"),
    OptionSpec::new("utility_tracking", "Monitoraggio bollette"),
];

const COMMUNICATION_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("house_chat", "Chat per ogni casa"),
    OptionSpec::new("announcements", "Bacheca avvisi"),
    OptionSpec::new("damage_log", "Registro danni con foto"),
];

const SERVICES_INTEREST: &[OptionSpec] = &[
    OptionSpec::new("yes", "Sì"),
    OptionSpec::new("maybe", "Forse"),
    OptionSpec::new("no", "No"),
];

const SERVICE_TYPES: &[OptionSpec] = &[
    OptionSpec::new("cleaning", "Pulizie"),
    OptionSpec::new("repairs", "Idraulico/elettricista"),
    OptionSpec::new("check_in", "Check-in e check-out"),
    OptionSpec::new("listing", "Foto e annunci"),
    OptionSpec::new("legal", "Consulenza legale/fiscale"),
];

const PRICING: &[OptionSpec] = &[
    OptionSpec::new("free_only", "Solo se gratuito"),
    OptionSpec::new("under_10", "Fino a €10/mese per immobile"),
    OptionSpec::new("10_25", "€10-25/mese per immobile"),
    OptionSpec::new("over_25", "Più di €25/mese per immobile"),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "profile",
        title: "A) Il tuo profilo",
    },
    SectionSpec {
        id: "current_management",
        title: "B) Come gestisci oggi",
    },
    SectionSpec {
        id: "pain_ratings",
        title: "C) Quanto ti pesa oggi...",
    },
    SectionSpec {
        id: "value_ratings",
        title: "D) Quanto varrebbe automatizzare...",
    },
    SectionSpec {
        id: "top3",
        title: "E) Le tue 3 priorità",
    },
    SectionSpec {
        id: "deep_dive",
        title: "F) Approfondimento",
    },
    SectionSpec {
        id: "services",
        title: "G) Servizi",
    },
    SectionSpec {
        id: "contact",
        title: "H) Prezzo e contatti",
    },
];

const RATING: FieldKind = FieldKind::Scale {
    min: 1,
    max: 5,
    default: 3,
};

const FEATURE_BOUND: Cardinality = Cardinality::between(1, 2);

const fn deep_dive(
    name: &'static str,
    label: &'static str,
    topic: &'static str,
    options: &'static [OptionSpec],
) -> FieldSpec {
    FieldSpec::new(
        name,
        label,
        "deep_dive",
        FieldKind::MultiSelect {
            options,
            bound: FEATURE_BOUND,
        },
    )
    .visible_when(Visibility::WhenRankedWithin {
        field: "top3",
        option: topic,
        rank: DEEP_DIVE_RANK,
    })
    .with_message("Scegli 1 o 2 funzioni")
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "properties_count",
        "Q1. Quanti immobili affitti?",
        "profile",
        FieldKind::Choice {
            options: PROPERTIES_COUNT,
        },
    ),
    FieldSpec::new(
        "rental_type",
        "Q2. Che tipo di affitto gestisci?",
        "profile",
        FieldKind::Choice { options: RENTAL_TYPE },
    ),
    FieldSpec::new(
        "city",
        "Q3. Città",
        "profile",
        FieldKind::Text {
            max_chars: 80,
            format: TextFormat::Plain,
        },
    )
    .with_message("Inserisci la città"),
    FieldSpec::new(
        "management_today",
        "Q4. Come gestisci oggi i tuoi affitti?",
        "current_management",
        FieldKind::Choice {
            options: MANAGEMENT_TODAY,
        },
    ),
    FieldSpec::new(
        "time_spent",
        "Q5. Quanto tempo ci dedichi?",
        "current_management",
        FieldKind::Choice { options: TIME_SPENT },
    ),
    FieldSpec::new("pain_payments", "Incasso affitti e pagamenti", "pain_ratings", RATING),
    FieldSpec::new("pain_maintenance", "Manutenzioni e guasti", "pain_ratings", RATING),
    FieldSpec::new("pain_tenant_search", "Ricerca e selezione inquilini", "pain_ratings", RATING),
    FieldSpec::new("pain_contracts", "Contratti e scadenze", "pain_ratings", RATING),
    FieldSpec::new("pain_expenses", "Spese e contabilità", "pain_ratings", RATING),
    FieldSpec::new("pain_communication", "Comunicazione con gli inquilini", "pain_ratings", RATING),
    FieldSpec::new("value_payments", "Incasso affitti e pagamenti", "value_ratings", RATING),
    FieldSpec::new("value_maintenance", "Manutenzioni e guasti", "value_ratings", RATING),
    FieldSpec::new("value_tenant_search", "Ricerca e selezione inquilini", "value_ratings", RATING),
    FieldSpec::new("value_contracts", "Contratti e scadenze", "value_ratings", RATING),
    FieldSpec::new("value_expenses", "Spese e contabilità", "value_ratings", RATING),
    FieldSpec::new("value_communication", "Comunicazione con gli inquilini", "value_ratings", RATING),
    FieldSpec::new(
        "top3",
        "Q6. Scegli esattamente 3 priorità, in ordine di importanza",
        "top3",
        FieldKind::MultiSelect {
            options: TOPICS,
            bound: Cardinality::exactly(3),
        },
    )
    .with_message("Scegli esattamente 3 priorità"),
    deep_dive(
        "features_payments",
        "Pagamenti: quali funzioni ti servono? (max 2)",
        "payments",
        PAYMENTS_FEATURES,
    ),
    deep_dive(
        "features_maintenance",
        "Manutenzioni: quali funzioni ti servono? (max 2)",
        "maintenance",
        MAINTENANCE_FEATURES,
    ),
    deep_dive(
        "features_tenant_search",
        "Ricerca inquilini: quali funzioni ti servono? (max 2)",
        "tenant_search",
        TENANT_SEARCH_FEATURES,
    ),
    deep_dive(
        "features_contracts",
        "Contratti: quali funzioni ti servono? (max 2)",
        "contracts",
        CONTRACTS_FEATURES,
    ),
    deep_dive(
        "features_expenses",
        "Spese: quali funzioni ti servono? (max 2)",
        "expenses",
        EXPENSES_FEATURES,
    ),
    deep_dive(
        "features_communication",
        "Comunicazione: quali funzioni ti servono? (max 2)",
        "communication",
        COMMUNICATION_FEATURES,
    ),
    FieldSpec::new(
        "services_interest",
        "Q7. Ti interesserebbe prenotare servizi per i tuoi immobili dall'app?",
        "services",
        FieldKind::Choice {
            options: SERVICES_INTEREST,
        },
    ),
    FieldSpec::new(
        "service_types",
        "Q7a. Quali servizi?",
        "services",
        FieldKind::MultiSelect {
            options: SERVICE_TYPES,
            bound: Cardinality::at_least(1),
        },
    )
    .visible_when(Visibility::WhenChoiceIn {
        field: "services_interest",
        values: SERVICES_TRIGGER,
    })
    .with_message("Seleziona almeno un servizio"),
    FieldSpec::new(
        "pricing",
        "Q8. Quanto saresti disposto a pagare?",
        "contact",
        FieldKind::Choice { options: PRICING },
    ),
    FieldSpec::new(
        "wow_factor",
        "Q9. Cosa ti farebbe dire \"wow\"? (facoltativo)",
        "contact",
        FieldKind::Text {
            max_chars: 200,
            format: TextFormat::Plain,
        },
    )
    .optional(),
    FieldSpec::new(
        "email",
        "Email",
        "contact",
        FieldKind::Text {
            max_chars: 254,
            format: TextFormat::Email,
        },
    ),
    FieldSpec::new(
        "privacy_consent",
        "Accetto l'informativa privacy per essere ricontattato.",
        "contact",
        FieldKind::Consent,
    ),
];

pub static OWNER_SCHEMA: SurveySchema = SurveySchema {
    persona: Persona::Owner,
    title: "Questionario Proprietari",
    sections: SECTIONS,
    fields: FIELDS,
};

/// Name of the deep-dive field for a topic id, if the topic exists.
#[must_use]
pub fn deep_dive_field(topic: &str) -> Option<&'static str> {
    OWNER_SCHEMA
        .fields
        .iter()
        .find(|field| {
            matches!(
                field.visibility,
                Visibility::WhenRankedWithin { option, .. } if option == topic
            )
        })
        .map(|field| field.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_ratings_and_a_deep_dive() {
        for topic in TOPICS {
            for prefix in ["pain", "value"] {
                let name = format!("{prefix}_{}", topic.id);
                let field = OWNER_SCHEMA.field(&name);
                assert!(
                    matches!(field.map(|f| f.kind), Some(FieldKind::Scale { default: 3, .. })),
                    "missing rating {name}"
                );
            }
            let deep_dive = deep_dive_field(topic.id);
            assert_eq!(deep_dive, Some(format!("features_{}", topic.id)).as_deref());
        }
    }

    #[test]
    fn eight_sections() {
        assert_eq!(OWNER_SCHEMA.sections.len(), 8);
    }
}
