//! Built-in demo documents, used when no input files are supplied.

pub const SAMPLE_JOB_DESCRIPTION: &str = r#"
Senior Software Engineer - Python

We are looking for an experienced Python developer to join our backend team.

Requirements:
- 5+ years of software development experience
- Strong proficiency in Python and Django
- Experience with AWS services (S3, Lambda, EC2)
- Knowledge of RESTful API design
- Experience with SQL and NoSQL databases
- Familiarity with Docker and Kubernetes
- Strong problem-solving skills
- Bachelor's degree in Computer Science or related field
"#;

pub const SAMPLE_RESUME: &str = r#"
John Doe
Software Engineer

EXPERIENCE:
Senior Software Engineer at Tech Corp (2019-Present)
- Developed Python/Django applications for e-commerce platform
- Built RESTful APIs serving 1M+ requests per day
- Implemented AWS Lambda functions for serverless architecture
- Managed PostgreSQL and MongoDB databases
- Deployed applications using Docker and Kubernetes

Software Engineer at StartupXYZ (2016-2019)
- Built web applications using Python and Flask
- Worked with AWS services including S3 and EC2
- Implemented CI/CD pipelines

EDUCATION:
B.S. in Computer Science, State University (2016)

SKILLS:
Python, Django, Flask, AWS, Docker, Kubernetes, PostgreSQL, MongoDB, REST APIs
"#;
