//! Built-in tutorial content for every stack.

use crate::error::Error;
use crate::model::{
    CodeSample, InteractiveElement, SectionId, TutorialContent, TutorialSection, TutorialStack,
};

/// Supplies the ordered sections of a stack.
pub trait ContentProvider: Send + Sync {
    fn content(&self, stack: TutorialStack) -> &TutorialContent;
}

/// Content compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    stacks: Vec<TutorialContent>,
}

impl StaticCatalog {
    /// Build the catalog for every stack.
    ///
    /// # Errors
    ///
    /// Returns `Error` if a section definition is invalid (blank title,
    /// duplicate id, bad quiz answer).
    pub fn load() -> Result<Self, Error> {
        let stacks = TutorialStack::ALL
            .into_iter()
            .map(build_stack)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stacks })
    }
}

impl ContentProvider for StaticCatalog {
    fn content(&self, stack: TutorialStack) -> &TutorialContent {
        // `load` builds one entry per stack, in `TutorialStack::ALL` order
        &self.stacks[stack.index()]
    }
}

fn section(id: &str, title: &str, description: &str) -> Result<TutorialSection, Error> {
    Ok(TutorialSection::new(SectionId::new(id)?, title, description)?)
}

fn checkpoint(prompt: &str) -> InteractiveElement {
    InteractiveElement::checkpoint(prompt, "I did it")
}

fn build_stack(stack: TutorialStack) -> Result<TutorialContent, Error> {
    let (title, summary, sections) = match stack {
        TutorialStack::Node => node()?,
        TutorialStack::Spring => spring()?,
        TutorialStack::Ansible => ansible()?,
        TutorialStack::Docker => docker()?,
        TutorialStack::Linux => linux()?,
        TutorialStack::Sql => sql()?,
        TutorialStack::NoSql => nosql()?,
    };
    Ok(TutorialContent::new(stack, title, summary, sections)?)
}

type StackParts = (&'static str, &'static str, Vec<TutorialSection>);

fn node() -> Result<StackParts, Error> {
    Ok((
        "Node.js from zero to API",
        "Install Node, manage packages, and ship a small HTTP service.",
        vec![
            section(
                "intro",
                "What Node.js is",
                "Node.js runs JavaScript outside the browser on top of the **V8** engine and an event loop.",
            )?
            .with_bullets([
                "Single-threaded event loop",
                "Non-blocking I/O",
                "Huge package ecosystem via npm",
            ]),
            section("install", "Installing Node", "Use a version manager so projects can pin their runtime.")?
                .with_code(CodeSample::new(
                    "bash",
                    "curl -fsSL https://fnm.vercel.app/install | bash\nfnm install 20\nnode --version",
                ))
                .with_interactive(checkpoint("Run `node --version` and confirm it prints v20.")),
            section("npm", "Project setup with npm", "`npm init` creates `package.json`, which records dependencies and scripts.")?
                .with_code(CodeSample::new(
                    "bash",
                    "mkdir hello-api && cd hello-api\nnpm init -y\nnpm install express",
                )),
            section("server", "A first HTTP server", "Express wraps Node's `http` module with routing and middleware.")?
                .with_code(CodeSample::new(
                    "javascript",
                    "const express = require(\"express\");\nconst app = express();\n\napp.get(\"/health\", (req, res) => {\n  res.json({ ok: true });\n});\n\n// listen on 3000 unless PORT is set\napp.listen(process.env.PORT || 3000);",
                )),
            section("async", "Async and await", "Promises model future values; `await` pauses the function, not the process.")?
                .with_code(CodeSample::new(
                    "javascript",
                    "async function load(path) {\n  const text = await fs.promises.readFile(path, \"utf8\");\n  return JSON.parse(text);\n}",
                ))
                .with_interactive(InteractiveElement::quiz(
                    "What does `await` block?",
                    vec![
                        "The whole Node process".into(),
                        "Only the current async function".into(),
                        "Every pending request".into(),
                    ],
                    1,
                )?),
        ],
    ))
}

fn spring() -> Result<StackParts, Error> {
    Ok((
        "Spring Boot essentials",
        "Bootstrap a Spring Boot service with a REST controller and configuration.",
        vec![
            section("intro", "Why Spring Boot", "Spring Boot adds auto-configuration and an embedded server on top of the Spring framework.")?
                .with_bullets(["Starter dependencies", "Auto-configuration", "Production-ready actuator endpoints"]),
            section("initializr", "Generating a project", "start.spring.io produces a Maven or Gradle skeleton.")?
                .with_code(CodeSample::new(
                    "bash",
                    "curl https://start.spring.io/starter.zip -d dependencies=web,actuator -o demo.zip\nunzip demo.zip && ./mvnw spring-boot:run",
                )),
            section("controller", "A REST controller", "Annotated classes map HTTP routes to methods.")?
                .with_code(CodeSample::new(
                    "java",
                    "@RestController\npublic class GreetingController {\n    @GetMapping(\"/greeting\")\n    public Greeting greeting(@RequestParam(defaultValue = \"World\") String name) {\n        return new Greeting(\"Hello, \" + name);\n    }\n}",
                ))
                .with_interactive(checkpoint("Call /greeting?name=you and confirm the JSON response.")),
            section("config", "Externalized configuration", "Properties files and environment variables override defaults without a rebuild.")?
                .with_code(CodeSample::new(
                    "properties",
                    "# application.properties\nserver.port=8081\nspring.application.name=demo",
                )),
        ],
    ))
}

fn ansible() -> Result<StackParts, Error> {
    Ok((
        "Automating servers with Ansible",
        "Describe infrastructure as playbooks and apply them over SSH.",
        vec![
            section("intro", "Agentless automation", "Ansible connects over SSH and runs idempotent modules on each host.")?,
            section("inventory", "Inventory", "The inventory lists hosts and groups them.")?
                .with_code(CodeSample::new(
                    "ini",
                    "[web]\nweb1.example.com\nweb2.example.com\n\n[db]\ndb1.example.com",
                )),
            section("playbook", "A first playbook", "Plays map host groups to ordered tasks.")?
                .with_code(CodeSample::new(
                    "yaml",
                    "- hosts: web\n  become: true\n  tasks:\n    - name: Install nginx\n      apt:\n        name: nginx\n        state: present\n    - name: Start nginx\n      service:\n        name: nginx\n        state: started",
                ))
                .with_interactive(checkpoint("Run the playbook twice and confirm the second run reports no changes.")),
            section("roles", "Roles", "Roles package tasks, templates, and defaults for reuse.")?
                .with_bullets(["tasks/main.yml", "templates/", "defaults/main.yml"]),
        ],
    ))
}

fn docker() -> Result<StackParts, Error> {
    Ok((
        "Containers with Docker",
        "Package an application as an image and run multi-container setups.",
        vec![
            section("intro", "Images and containers", "An image is a read-only template; a container is a running instance of it.")?
                .with_bullets(["Layers are cached", "Containers are disposable", "Volumes keep data"]),
            section("setup", "Writing a Dockerfile", "Each instruction adds a layer; order them from least to most frequently changed.")?
                .with_code(CodeSample::new(
                    "dockerfile",
                    "FROM node:20-alpine\nWORKDIR /app\nCOPY package*.json ./\nRUN npm ci --omit=dev\nCOPY . .\nEXPOSE 3000\nCMD [\"node\", \"index.js\"]",
                ))
                .with_interactive(checkpoint("Build the image with `docker build -t hello .`.")),
            section("compose", "Docker Compose", "Compose declares several services, their networks, and volumes in one file.")?
                .with_code(CodeSample::new(
                    "yaml",
                    "services:\n  api:\n    build: .\n    ports:\n      - \"3000:3000\"\n    depends_on:\n      - db\n  db:\n    image: postgres:16\n    environment:\n      POSTGRES_PASSWORD: example",
                )),
        ],
    ))
}

fn linux() -> Result<StackParts, Error> {
    Ok((
        "Linux command line",
        "Navigate the filesystem, manage permissions, and inspect processes.",
        vec![
            section("intro", "The shell", "The shell reads commands, expands them, and starts processes.")?,
            section("files", "Files and directories", "Everything is a file; paths start at `/`.")?
                .with_code(CodeSample::new(
                    "bash",
                    "ls -la /etc\nmkdir -p ~/projects/demo\ncp -r src/ backup/",
                )),
            section("permissions", "Permissions", "Read, write, and execute bits apply to owner, group, and others.")?
                .with_code(CodeSample::new("bash", "chmod 750 deploy.sh\nchown app:app /srv/app"))
                .with_interactive(InteractiveElement::quiz(
                    "What does mode 750 grant to others?",
                    vec!["Read only".into(), "Nothing".into(), "Execute only".into()],
                    1,
                )?),
            section("processes", "Processes", "Inspect and signal running programs.")?
                .with_code(CodeSample::from_markup(
                    "bash",
                    "<span class=\"cmd\">ps aux | grep nginx</span><br>\
                     <span class=\"cmd\">kill -HUP $(pidof nginx)</span> <i># reload config</i>",
                )),
        ],
    ))
}

fn sql() -> Result<StackParts, Error> {
    Ok((
        "Relational data with SQL",
        "Model tables, query them, and keep changes consistent with transactions.",
        vec![
            section("intro", "Tables and rows", "A relational database stores rows in typed tables linked by keys.")?,
            section("schema", "Creating a schema", "Constraints keep bad data out.")?
                .with_code(CodeSample::new(
                    "sql",
                    "CREATE TABLE users (\n  id INTEGER PRIMARY KEY,\n  email TEXT NOT NULL UNIQUE\n);",
                )),
            section("queries", "Querying", "Filter, join, and aggregate with `SELECT`.")?
                .with_code(CodeSample::new(
                    "sql",
                    "SELECT u.email, COUNT(o.id) AS orders\nFROM users u\nLEFT JOIN orders o ON o.user_id = u.id\nGROUP BY u.email -- one row per user\nORDER BY orders DESC;",
                ))
                .with_interactive(checkpoint("Run the query against a sample database.")),
            section("transactions", "Transactions", "Group statements so they commit or roll back together.")?
                .with_code(CodeSample::new(
                    "sql",
                    "BEGIN;\nUPDATE accounts SET balance = balance - 10 WHERE id = 1;\nUPDATE accounts SET balance = balance + 10 WHERE id = 2;\nCOMMIT;",
                )),
        ],
    ))
}

fn nosql() -> Result<StackParts, Error> {
    Ok((
        "Document stores and NoSQL",
        "Trade joins for flexible documents and horizontal scaling.",
        vec![
            section("intro", "NoSQL families", "Key-value, document, column, and graph stores each fit different access patterns.")?
                .with_bullets(["Key-value: Redis", "Document: MongoDB", "Wide column: Cassandra", "Graph: Neo4j"]),
            section("documents", "Modeling documents", "Embed data that is read together; reference data that changes independently.")?
                .with_code(CodeSample::new(
                    "json",
                    "{\n  \"_id\": \"order-1001\",\n  \"customer\": { \"name\": \"Ada\" },\n  \"items\": [{ \"sku\": \"book-1\", \"qty\": 2 }],\n  \"paid\": true\n}",
                )),
            section("queries", "Querying MongoDB", "Queries are documents too.")?
                .with_code(CodeSample::new(
                    "javascript",
                    "db.orders.find({ paid: true, \"items.qty\": { $gt: 1 } })",
                ))
                .with_interactive(checkpoint("Insert a document and find it again by a nested field.")),
        ],
    ))
}
