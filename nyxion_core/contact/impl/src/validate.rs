use nyxion_core_contact_contracts::ContactFormError;
use nyxion_models::contact::{
    ContactAuthor, ContactAuthorName, ContactEmail, ContactForm, ContactFormInput,
    ContactMessageContent, ContactMessageContentError, ContactSubmission, ContactTopic,
    PhoneNumber,
};

/// Run the field checks of `form` on `input`.
///
/// The checks run in a fixed order and the first violation is reported.
pub(crate) fn validate_submission(
    form: ContactForm,
    input: ContactFormInput,
) -> Result<ContactSubmission, ContactFormError> {
    let ContactFormInput {
        name,
        email,
        phone,
        service,
        message,
        ..
    } = input;

    let (Some(name), Some(email), Some(message)) =
        (non_empty(name), non_empty(email), non_empty(message))
    else {
        return Err(ContactFormError::MissingFields);
    };
    let phone = non_empty(phone);
    if form.requires_phone() && phone.is_none() {
        return Err(ContactFormError::MissingFields);
    }

    let email = ContactEmail::try_new(email).map_err(|_| ContactFormError::InvalidEmail)?;
    let name = ContactAuthorName::try_new(name).map_err(|_| ContactFormError::NameTooLong)?;
    let content = ContactMessageContent::try_new(message).map_err(|err| match err {
        ContactMessageContentError::LenCharMinViolated => ContactFormError::MessageTooShort,
        ContactMessageContentError::LenCharMaxViolated => ContactFormError::MessageTooLong,
    })?;
    let phone = phone
        .map(PhoneNumber::try_new)
        .transpose()
        .map_err(|_| ContactFormError::InvalidPhone)?;

    let topic = validate_topic(form, non_empty(service))?;

    Ok(ContactSubmission {
        author: ContactAuthor { name, email, phone },
        topic,
        content,
    })
}

fn validate_topic(
    form: ContactForm,
    service: Option<String>,
) -> Result<ContactTopic, ContactFormError> {
    let topic = service.map(|service| service.parse::<ContactTopic>());

    match (topic, form.placeholder_topic()) {
        (None, Some(_)) => Err(ContactFormError::TopicMissing),
        (Some(Ok(topic)), Some(placeholder)) if topic == placeholder => {
            Err(ContactFormError::TopicMissing)
        }
        (Some(Ok(topic)), _) if form.topics().contains(&topic) => Ok(topic),
        _ => Err(ContactFormError::TopicInvalid),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.is_empty())
}

#[cfg(test)]
mod tests {
    use nyxion_utils::assert_matches;

    use super::*;

    fn input() -> ContactFormInput {
        ContactFormInput {
            name: Some("Max Mustermann".into()),
            email: Some("max@example.com".into()),
            phone: Some("612 345 678".into()),
            service: Some("preventiva".into()),
            message: Some("Hola, necesito una auditoría.".into()),
            honeypot: None,
            captcha_response: None,
        }
    }

    #[test]
    fn ok() {
        let submission = validate_submission(ContactForm::Recaptcha, input()).unwrap();

        assert_eq!(*submission.author.name, "Max Mustermann");
        assert_eq!(*submission.author.email, "max@example.com");
        assert_eq!(
            submission.author.phone.as_deref().map(String::as_str),
            Some("612 345 678")
        );
        assert_eq!(submission.topic, ContactTopic::Preventive);
        assert_eq!(*submission.content, "Hola, necesito una auditoría.");
    }

    #[test]
    fn missing_fields() {
        for input in [
            ContactFormInput {
                name: None,
                ..input()
            },
            ContactFormInput {
                email: Some(String::new()),
                ..input()
            },
            ContactFormInput {
                message: None,
                ..input()
            },
        ] {
            for form in [ContactForm::Recaptcha, ContactForm::Turnstile] {
                assert_matches!(
                    validate_submission(form, input.clone()),
                    Err(ContactFormError::MissingFields)
                );
            }
        }
    }

    #[test]
    fn phone_required_by_recaptcha_form() {
        let input = ContactFormInput {
            phone: Some(String::new()),
            ..input()
        };

        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input.clone()),
            Err(ContactFormError::MissingFields)
        );

        let submission = validate_submission(ContactForm::Turnstile, input).unwrap();
        assert_eq!(submission.author.phone, None);
    }

    #[test]
    fn invalid_phone() {
        for form in [ContactForm::Recaptcha, ContactForm::Turnstile] {
            let input = ContactFormInput {
                phone: Some("12345".into()),
                ..input()
            };
            assert_matches!(
                validate_submission(form, input),
                Err(ContactFormError::InvalidPhone)
            );
        }
    }

    #[test]
    fn invalid_email() {
        let input = ContactFormInput {
            name: Some("A".into()),
            email: Some("bad".into()),
            phone: None,
            service: Some("preventiva".into()),
            message: Some("1234567890".into()),
            ..Default::default()
        };

        assert_matches!(
            validate_submission(ContactForm::Turnstile, input),
            Err(ContactFormError::InvalidEmail)
        );
    }

    #[test]
    fn name_too_long() {
        let input = ContactFormInput {
            name: Some("a".repeat(101)),
            ..input()
        };

        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input),
            Err(ContactFormError::NameTooLong)
        );
    }

    #[test]
    fn message_length() {
        for (message, expected) in [
            ("too short".to_owned(), Err(ContactFormError::MessageTooShort)),
            ("x".repeat(5001), Err(ContactFormError::MessageTooLong)),
            ("1234567890".to_owned(), Ok(())),
            ("x".repeat(5000), Ok(())),
        ] {
            let input = ContactFormInput {
                message: Some(message),
                ..input()
            };
            let result = validate_submission(ContactForm::Recaptcha, input).map(|_| ());
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn checks_run_in_order() {
        // invalid email, name, message, phone and service: the email is reported
        let input = ContactFormInput {
            name: Some("a".repeat(101)),
            email: Some("bad".into()),
            phone: Some("12345".into()),
            service: Some("otro".into()),
            message: Some("short".into()),
            ..Default::default()
        };
        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input.clone()),
            Err(ContactFormError::InvalidEmail)
        );

        let input = ContactFormInput {
            email: Some("max@example.com".into()),
            ..input
        };
        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input.clone()),
            Err(ContactFormError::NameTooLong)
        );

        let input = ContactFormInput {
            name: Some("Max".into()),
            ..input
        };
        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input.clone()),
            Err(ContactFormError::MessageTooShort)
        );

        let input = ContactFormInput {
            message: Some("1234567890".into()),
            ..input
        };
        assert_matches!(
            validate_submission(ContactForm::Recaptcha, input.clone()),
            Err(ContactFormError::InvalidPhone)
        );

        let input = ContactFormInput {
            phone: None,
            ..input
        };
        assert_matches!(
            validate_submission(ContactForm::Turnstile, input),
            Err(ContactFormError::TopicInvalid)
        );
    }

    #[test]
    fn recaptcha_form_topics() {
        for (service, expected) in [
            (None, Err(ContactFormError::TopicMissing)),
            (Some(""), Err(ContactFormError::TopicMissing)),
            (Some("interes"), Err(ContactFormError::TopicMissing)),
            (Some("otro"), Err(ContactFormError::TopicInvalid)),
            (Some("Preventiva"), Err(ContactFormError::TopicInvalid)),
            (Some("preventiva"), Ok(ContactTopic::Preventive)),
            (Some("reactiva"), Ok(ContactTopic::Reactive)),
            (Some("avanzada"), Ok(ContactTopic::Advanced)),
            (Some("formacion"), Ok(ContactTopic::Training)),
            (Some("consulta"), Ok(ContactTopic::General)),
        ] {
            let input = ContactFormInput {
                service: service.map(Into::into),
                ..input()
            };
            let result = validate_submission(ContactForm::Recaptcha, input).map(|x| x.topic);
            assert_eq!(result, expected, "{service:?}");
        }
    }

    #[test]
    fn turnstile_form_topics() {
        for (service, expected) in [
            (None, Err(ContactFormError::TopicInvalid)),
            (Some("otro"), Err(ContactFormError::TopicInvalid)),
            (Some("interes"), Ok(ContactTopic::Unspecified)),
            (Some("consulta"), Ok(ContactTopic::General)),
        ] {
            let input = ContactFormInput {
                service: service.map(Into::into),
                ..input()
            };
            let result = validate_submission(ContactForm::Turnstile, input).map(|x| x.topic);
            assert_eq!(result, expected, "{service:?}");
        }
    }
}
