//! Default content installed by `stolarija admin init`. Seeding is
//! idempotent: rows already present (matched by unique key) are kept.

use chrono::Utc;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::error::Result;
use crate::store::Store;
use crate::types::{AdminUser, Service, ServiceIcon};

struct ServiceSeed {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    icon: ServiceIcon,
    order: i32,
}

const SERVICES: [ServiceSeed; 6] = [
    ServiceSeed {
        name: "Kuhinje po mjeri",
        slug: "kuhinje",
        description: "Izrađujemo kuhinje po mjeri koje savršeno odgovaraju vašem prostoru i potrebama. Koristimo kvalitetne materijale i pažljivo izrađujemo svaki detalj.",
        icon: ServiceIcon::ChefHat,
        order: 1,
    },
    ServiceSeed {
        name: "Vrata i prozori",
        slug: "vrata",
        description: "Drvena vrata i prozori izrađeni od najkvalitetnijeg drva. Kombinacija tradicije i moderne tehnologije za dugotrajnost i estetiku.",
        icon: ServiceIcon::DoorOpen,
        order: 2,
    },
    ServiceSeed {
        name: "Namještaj po mjeri",
        slug: "namjestaj",
        description: "Ormare, komode, police i drugi namještaj izrađujemo prema vašim željama. Svaki komad je jedinstven i prilagođen vašem prostoru.",
        icon: ServiceIcon::Armchair,
        order: 3,
    },
    ServiceSeed {
        name: "Stepenice",
        slug: "stepenice",
        description: "Drvene stepenice koje su spoj funkcionalnosti i ljepote. Izrađujemo ravne, zavojite i konzolne stepenice.",
        icon: ServiceIcon::Stairs,
        order: 4,
    },
    ServiceSeed {
        name: "Restauracija",
        slug: "restauracija",
        description: "Obnavljamo stari namještaj i vraćamo mu nekadašnji sjaj. S poštovanjem prema tradiciji i originalnom izgledu.",
        icon: ServiceIcon::Hammer,
        order: 5,
    },
    ServiceSeed {
        name: "Poslovni prostori",
        slug: "poslovni-prostori",
        description: "Opremamo restorane, hotele, kafiće i poslovne prostore. Kompletan interijer od drva prema vašim specifikacijama.",
        icon: ServiceIcon::Building2,
        order: 6,
    },
];

const SETTINGS: [(&str, &str); 5] = [
    ("contact_email", "info@drvodjelja.hr"),
    ("contact_phone", "+385 XX XXX XXXX"),
    ("contact_address", "Adresa radionice, Grad"),
    ("working_hours", "Pon-Pet: 08:00-16:00, Sub: 08:00-12:00"),
    (
        "about_text",
        "Drvodjelja je stolarska radionica s preko 30 godina iskustva u izradi kvalitetnog drvenog namještaja i stolarije. Naša tradicija, znanje i ljubav prema drvu čine svaki naš proizvod posebnim.",
    ),
];

/// Creates the admin account unless one with the same email already exists.
/// Returns the created user, or None when the account was already there.
pub fn seed_admin_user(
    store: &dyn Store,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Option<AdminUser>> {
    let email = email.trim().to_lowercase();
    if store.get_admin_user_by_email(&email)?.is_some() {
        return Ok(None);
    }

    let password_hash = hash_password(password)?;

    let user = AdminUser {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash,
        name: name.trim().to_string(),
        created_at: Utc::now(),
    };
    store.create_admin_user(&user)?;
    Ok(Some(user))
}

/// Installs the default services and site settings. Existing rows win: a
/// service whose slug is taken is skipped, settings only fill missing keys.
pub fn seed_defaults(store: &dyn Store) -> Result<()> {
    let now = Utc::now();

    for entry in &SERVICES {
        if store.get_service_by_slug(entry.slug)?.is_some() {
            continue;
        }
        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: entry.name.to_string(),
            slug: entry.slug.to_string(),
            description: Some(entry.description.to_string()),
            icon: entry.icon,
            order: entry.order,
            active: true,
            created_at: now,
            updated_at: now,
        };
        store.create_service(&service)?;
    }

    for (key, value) in SETTINGS {
        if store.get_setting(key)?.is_none() {
            store.upsert_setting(key, value)?;
        }
    }

    Ok(())
}
