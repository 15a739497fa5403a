//! Tenant ("coinquilini") questionnaire.
//!
//! Five sections. Only `event_types` is conditional: it is active while the
//! visitor says they are interested in (or unsure about) local events, and it
//! stays optional even then.

use crate::schema::{
    Cardinality, FieldKind, FieldSpec, OptionSpec, Persona, SectionSpec, SurveySchema, TextFormat,
    Visibility,
};

/// Answers to `events_interest` that open the event types question.
pub const EVENTS_TRIGGER: &[&str] = &["interested", "maybe"];

const LOOKING_FOR: &[OptionSpec] = &[
    OptionSpec::new("room", "Una stanza/casa"),
    OptionSpec::new("roommate", "Un coinquilino per una casa che ho già"),
    OptionSpec::new("both", "Entrambi"),
];

const BUDGET: &[OptionSpec] = &[
    OptionSpec::new("under_400", "< €400"),
    OptionSpec::new("400_600", "€400-600"),
    OptionSpec::new("600_800", "€600-800"),
    OptionSpec::new("800_1000", "€800-1.000"),
    OptionSpec::new("over_1000", "> €1.000"),
];

const DURATION: &[OptionSpec] = &[
    OptionSpec::new("3_4_months", "3-4 mesi"),
    OptionSpec::new("6_8_months", "6-8 mesi"),
    OptionSpec::new("over_8_months", ">8 mesi"),
];

const IMPORTANCE: &[OptionSpec] = &[
    OptionSpec::new("not_at_all", "Per nulla"),
    OptionSpec::new("little", "Poco"),
    OptionSpec::new("neutral", "Neutro"),
    OptionSpec::new("important", "Importante"),
    OptionSpec::new("very_important", "Molto importante"),
];

const PRIORITIES: &[OptionSpec] = &[
    OptionSpec::new("roommates", "Compatibilità con coinquilini"),
    OptionSpec::new("total_price", "Prezzo totale"),
    OptionSpec::new("location", "Posizione/trasporti"),
    OptionSpec::new("condition", "Condizioni della casa"),
    OptionSpec::new("space", "Dimensione stanza/spazi comuni"),
    OptionSpec::new("house_rules", "Regole chiare (ospiti, orari, pulizie)"),
];

const LIFESTYLE: &[OptionSpec] = &[
    OptionSpec::new("early_bird", "Orari: mattiniero"),
    OptionSpec::new("night_owl", "Orari: nottambulo"),
    OptionSpec::new("quiet", "Clima: tranquillo"),
    OptionSpec::new("social", "Clima: sociale"),
    OptionSpec::new("smoker", "Fumo: sì"),
    OptionSpec::new("non_smoker", "Fumo: no"),
    OptionSpec::new("pets_ok", "Animali domestici: ok"),
    OptionSpec::new("no_pets", "Animali domestici: meglio di no"),
    OptionSpec::new("weekly_cleaning", "Pulizie: routine settimanale"),
    OptionSpec::new("flexible_cleaning", "Pulizie: flessibili"),
    OptionSpec::new("remote_work", "Smart working frequente"),
    OptionSpec::new("guests_ok", "Ospiti saltuari ok"),
];

const MATCHING: &[OptionSpec] = &[
    OptionSpec::new("hobbies", "Hobby/interessi (es. sport, musica, gaming)"),
    OptionSpec::new("university", "Università/corso (es. Politecnico, Economia)"),
    OptionSpec::new("languages", "Lingue (es. scambio IT/EN)"),
    OptionSpec::new("background", "Background/Origini (es. studenti siciliani a Milano)"),
    OptionSpec::new("habits", "Abitudini (studio/lavoro, orari pasti, fitness)"),
];

const APP_FEATURES: &[OptionSpec] = &[
    OptionSpec::new("damage_tracking", "Tracciare danni con foto e responsabilità (tutela cauzione)"),
    OptionSpec::new("split_expenses", "Dividere spese stile Splitwise (affitto, bollette, extra)"),
    OptionSpec::new("house_calendar", "Calendario di casa (scadenze affitto, pulizie, eventi)"),
    OptionSpec::new("report_issues", "Segnalare problemi e prenotare fornitori verificati"),
    OptionSpec::new("house_chat", "Chat e bacheca di casa"),
];

const EVENTS_INTEREST: &[OptionSpec] = &[
    OptionSpec::new("interested", "Sì, mi interessa"),
    OptionSpec::new("maybe", "Forse"),
    OptionSpec::new("not_now", "No, non ora"),
];

const EVENT_TYPES: &[OptionSpec] = &[
    OptionSpec::new("university", "Università"),
    OptionSpec::new("sport", "Sport"),
    OptionSpec::new("music", "Musica"),
    OptionSpec::new("regional", "Community regionali (es. Sicilia)"),
    OptionSpec::new("languages", "Lingue"),
    OptionSpec::new("other", "Altro"),
];

const APP_USAGE: &[OptionSpec] = &[
    OptionSpec::new("find_only", "Solo per trovare coinquilino"),
    OptionSpec::new("find_and_manage", "Per trovare coinquilino e gestire la casa"),
    OptionSpec::new("weekly", "La userei ogni settimana"),
    OptionSpec::new("start_only", "La userei solo all'inizio"),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "situation",
        title: "A) Situazione attuale",
    },
    SectionSpec {
        id: "compatibility",
        title: "B) Compatibilità & priorità",
    },
    SectionSpec {
        id: "home_life",
        title: "C) Vita da coinquilino (gestione pratica)",
    },
    SectionSpec {
        id: "usage",
        title: "D) Utilizzo e feedback",
    },
    SectionSpec {
        id: "contact",
        title: "Email & privacy",
    },
];

const DATE: FieldKind = FieldKind::Text {
    max_chars: 10,
    format: TextFormat::Date,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "looking_for",
        "Q1. Cosa stai cercando?",
        "situation",
        FieldKind::Choice { options: LOOKING_FOR },
    ),
    FieldSpec::new(
        "location",
        "Q2. Città/Quartiere",
        "situation",
        FieldKind::Text {
            max_chars: 80,
            format: TextFormat::Plain,
        },
    )
    .with_message("Inserisci città/quartiere"),
    FieldSpec::new("move_in_date", "Finestra temporale: da", "situation", DATE).optional(),
    FieldSpec::new("move_out_date", "Finestra temporale: a", "situation", DATE).optional(),
    FieldSpec::new(
        "budget",
        "Q3. Budget mensile indicativo (affitto + spese)?",
        "situation",
        FieldKind::Choice { options: BUDGET },
    ),
    FieldSpec::new(
        "duration",
        "Q4. Durata prevista?",
        "situation",
        FieldKind::Choice { options: DURATION },
    ),
    FieldSpec::new(
        "compatibility_importance",
        "Q5. Quanto è importante per te la compatibilità con i coinquilini?",
        "compatibility",
        FieldKind::Choice { options: IMPORTANCE },
    ),
    FieldSpec::new(
        "priorities",
        "Q6. Scegli le tue 3 priorità (max 3)",
        "compatibility",
        FieldKind::MultiSelect {
            options: PRIORITIES,
            bound: Cardinality::at_most(3),
        },
    )
    .optional()
    .with_message("Massimo 3 priorità"),
    FieldSpec::new(
        "lifestyle_preferences",
        "Q7. Preferenze di convivenza",
        "compatibility",
        FieldKind::MultiSelect {
            options: LIFESTYLE,
            bound: Cardinality::any(),
        },
    )
    .optional(),
    FieldSpec::new(
        "matching_attributes",
        "Q8. Matching \"intelligente\": cosa vuoi considerare?",
        "compatibility",
        FieldKind::MultiSelect {
            options: MATCHING,
            bound: Cardinality::any(),
        },
    )
    .optional(),
    FieldSpec::new(
        "app_features",
        "Q9. Ti interessa che l'app ti aiuti a...",
        "home_life",
        FieldKind::MultiSelect {
            options: APP_FEATURES,
            bound: Cardinality::any(),
        },
    )
    .optional(),
    FieldSpec::new(
        "events_interest",
        "Q10. Eventi e social nella tua zona: ti piacerebbe?",
        "home_life",
        FieldKind::Choice {
            options: EVENTS_INTEREST,
        },
    ),
    FieldSpec::new(
        "event_types",
        "Q10a. Che tipo di eventi?",
        "home_life",
        FieldKind::MultiSelect {
            options: EVENT_TYPES,
            bound: Cardinality::any(),
        },
    )
    .optional()
    .visible_when(Visibility::WhenChoiceIn {
        field: "events_interest",
        values: EVENTS_TRIGGER,
    }),
    FieldSpec::new(
        "app_usage",
        "Q11. Quanto useresti un'app così?",
        "usage",
        FieldKind::Choice { options: APP_USAGE },
    ),
    FieldSpec::new(
        "wow_factor",
        "Q12. Cosa ti farebbe dire \"wow\"? (facoltativo)",
        "usage",
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

pub static TENANT_SCHEMA: SurveySchema = SurveySchema {
    persona: Persona::Tenant,
    title: "Questionario Coinquilini",
    sections: SECTIONS,
    fields: FIELDS,
};
